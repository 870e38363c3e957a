// Who can appear on stage, what they look like and what they can say.
use bevy::math::Vec2;
use strum::{EnumIter, IntoStaticStr};

use crate::geometry::Anchor;

/// Draw layer; lower layers are drawn and updated first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Scenery,
    Cast,
    Player,
    Items,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Every kind of prop the sequencer can spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
pub enum Role {
    Player,
    Fairy,
    Rhino,
    Lion,
    Rabbit,
    Elephant,
    Man1,
    Man2,
    StartButton,
    GameLabel,
    Earth,
    Mouse,
    Arrow,
    ItemsBar,
    Nail,
    Cage,
    Flowerpot,
    Horn,
    FirstAidKit,
    Saw,
    Carrot,
    Seed,
    Shovel,
    WateringCan,
    Speaker,
    SkipButton,
    PlayAgainButton,
}

/// Spawn defaults for a role.
#[derive(Debug, Clone, Copy)]
pub struct Blueprint {
    pub look: Look,
    pub anchor: Anchor,
    pub at: Vec2,
    pub layer: Layer,
    pub facing: Facing,
}

impl Role {
    pub fn blueprint(self) -> Blueprint {
        use Anchor::{Center, MidBottom};
        let (look, anchor, at, layer, facing) = match self {
            Role::Player => (Look::PlayerRun, MidBottom, (5.0, 600.0), Layer::Player, Facing::Right),
            Role::Fairy => (Look::Fairy, Center, (730.0, 250.0), Layer::Cast, Facing::Right),
            Role::Rhino => (Look::RhinoBefore, MidBottom, (800.0, 490.0), Layer::Cast, Facing::Left),
            Role::Lion => (Look::LionRun, MidBottom, (800.0, 530.0), Layer::Cast, Facing::Left),
            Role::Rabbit => (Look::RabbitRun, MidBottom, (800.0, 600.0), Layer::Cast, Facing::Left),
            Role::Elephant => (Look::ElephantRun, MidBottom, (500.0, 450.0), Layer::Cast, Facing::Right),
            Role::Man1 => (Look::Man1Walk, MidBottom, (0.0, 600.0), Layer::Cast, Facing::Right),
            Role::Man2 => (Look::Man2Walk, MidBottom, (800.0, 600.0), Layer::Cast, Facing::Left),
            Role::StartButton => (Look::StartButton, MidBottom, (495.0, 615.0), Layer::Scenery, Facing::Right),
            Role::GameLabel => (Look::GameLabel, MidBottom, (415.0, 300.0), Layer::Scenery, Facing::Right),
            Role::Earth => (Look::EarthWhole, Center, (400.0, 300.0), Layer::Scenery, Facing::Right),
            Role::Mouse => (Look::Mouse, Center, (450.0, 220.0), Layer::Scenery, Facing::Right),
            Role::Arrow => (Look::Arrow, Center, (300.0, 250.0), Layer::Scenery, Facing::Right),
            Role::ItemsBar => (Look::ItemsBar, Center, (400.0, 100.0), Layer::Scenery, Facing::Right),
            Role::Nail => (Look::Nail, MidBottom, (350.0, 530.0), Layer::Scenery, Facing::Right),
            Role::Cage => (Look::Cage, MidBottom, (500.0, 450.0), Layer::Items, Facing::Right),
            Role::Flowerpot => (Look::Flowerpot, MidBottom, (400.0, 535.0), Layer::Items, Facing::Right),
            Role::Horn => (Look::Horn, MidBottom, (320.0, 600.0), Layer::Items, Facing::Right),
            Role::FirstAidKit => (Look::FirstAidKit, MidBottom, (500.0, 600.0), Layer::Items, Facing::Right),
            Role::Saw => (Look::Saw, MidBottom, (700.0, 600.0), Layer::Items, Facing::Right),
            Role::Carrot => (Look::Carrot, MidBottom, (500.0, 400.0), Layer::Items, Facing::Right),
            Role::Seed => (Look::Seed, MidBottom, (400.0, 490.0), Layer::Items, Facing::Right),
            Role::Shovel => (Look::Shovel, MidBottom, (450.0, 535.0), Layer::Items, Facing::Right),
            Role::WateringCan => (Look::WateringCan, MidBottom, (250.0, 535.0), Layer::Items, Facing::Right),
            Role::Speaker => (Look::Speaker, MidBottom, (450.0, 535.0), Layer::Items, Facing::Right),
            Role::SkipButton => (Look::SkipButton, Center, (680.0, 130.0), Layer::Items, Facing::Right),
            Role::PlayAgainButton => (Look::PlayAgainButton, Center, (400.0, 440.0), Layer::Items, Facing::Right),
        };
        Blueprint {
            look,
            anchor,
            at: Vec2::new(at.0, at.1),
            layer,
            facing,
        }
    }

    /// Items the player can collect into the bar and drag around.
    pub fn is_item(self) -> bool {
        matches!(
            self,
            Role::Horn
                | Role::FirstAidKit
                | Role::Saw
                | Role::Carrot
                | Role::Seed
                | Role::Shovel
                | Role::WateringCan
                | Role::Speaker
        )
    }

    pub fn is_button(self) -> bool {
        matches!(self, Role::StartButton | Role::SkipButton | Role::PlayAgainButton)
    }

    /// Props that survive a round transition. Everything else belongs to the
    /// round that spawned it.
    pub fn carries_over(self) -> bool {
        self.is_item() || matches!(self, Role::Player | Role::Fairy | Role::ItemsBar)
    }
}

/// A set of animation frames for one pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
pub enum Look {
    PlayerRun,
    Fairy,
    RhinoBefore,
    RhinoAfter,
    RhinoDie,
    LionRun,
    LionWin,
    LionDie,
    LionHurt,
    RabbitRun,
    RabbitCry,
    ElephantRun,
    Man1Walk,
    Man2Walk,
    StartButton,
    GameLabel,
    EarthWhole,
    EarthHealed,
    Mouse,
    Arrow,
    ItemsBar,
    Nail,
    Cage,
    Flowerpot,
    Horn,
    FirstAidKit,
    Saw,
    Carrot,
    Seed,
    Shovel,
    WateringCan,
    Speaker,
    SkipButton,
    PlayAgainButton,
}

impl Look {
    pub fn frames(self) -> &'static [&'static str] {
        match self {
            Look::PlayerRun => &[
                "graphics/player/player_run1.png",
                "graphics/player/player_run2.png",
                "graphics/player/player_run3.png",
                "graphics/player/player_run4.png",
                "graphics/player/player_run5.png",
                "graphics/player/player_run6.png",
                "graphics/player/player_run7.png",
                "graphics/player/player_run8.png",
            ],
            Look::Fairy => &["graphics/fairy/fairy.png"],
            Look::RhinoBefore => &[
                "graphics/animals/rhino/before/rhino_before1.png",
                "graphics/animals/rhino/before/rhino_before2.png",
                "graphics/animals/rhino/before/rhino_before3.png",
                "graphics/animals/rhino/before/rhino_before4.png",
                "graphics/animals/rhino/before/rhino_before5.png",
                "graphics/animals/rhino/before/rhino_before6.png",
            ],
            Look::RhinoAfter => &[
                "graphics/animals/rhino/after/rhino_after1.png",
                "graphics/animals/rhino/after/rhino_after2.png",
                "graphics/animals/rhino/after/rhino_after3.png",
                "graphics/animals/rhino/after/rhino_after4.png",
                "graphics/animals/rhino/after/rhino_after5.png",
                "graphics/animals/rhino/after/rhino_after6.png",
            ],
            Look::RhinoDie => &["graphics/animals/rhino/rhino_die.png"],
            Look::LionRun => &[
                "graphics/animals/lion/lion_run1.png",
                "graphics/animals/lion/lion_run2.png",
                "graphics/animals/lion/lion_run3.png",
            ],
            Look::LionWin => &["graphics/animals/lion/lion_win.png"],
            Look::LionDie => &["graphics/animals/lion/lion_die.png"],
            Look::LionHurt => &["graphics/animals/lion/lion_hurt.png"],
            Look::RabbitRun => &[
                "graphics/animals/rabbit/rabbit_run1.png",
                "graphics/animals/rabbit/rabbit_run2.png",
                "graphics/animals/rabbit/rabbit_run3.png",
            ],
            Look::RabbitCry => &["graphics/animals/rabbit/rabbit_cry.png"],
            Look::ElephantRun => &[
                "graphics/animals/elephant/elephant_run1.png",
                "graphics/animals/elephant/elephant_run2.png",
                "graphics/animals/elephant/elephant_run3.png",
                "graphics/animals/elephant/elephant_run4.png",
            ],
            Look::Man1Walk => &[
                "graphics/man1/man_walk1.png",
                "graphics/man1/man_walk2.png",
                "graphics/man1/man_walk3.png",
                "graphics/man1/man_walk4.png",
                "graphics/man1/man_walk5.png",
            ],
            Look::Man2Walk => &[
                "graphics/man2/man_walk1.png",
                "graphics/man2/man_walk2.png",
                "graphics/man2/man_walk3.png",
                "graphics/man2/man_walk4.png",
                "graphics/man2/man_walk5.png",
            ],
            Look::StartButton => &["graphics/items/start_game/start_button.png"],
            Look::GameLabel => &["graphics/items/start_game/game_label.png"],
            Look::EarthWhole => &["graphics/items/intro/earth1.png"],
            Look::EarthHealed => &["graphics/items/intro/earth2.png"],
            Look::Mouse => &["graphics/items/round1/mouse_click.png"],
            Look::Arrow => &["graphics/items/round1/arrow.png"],
            Look::ItemsBar => &["graphics/items/player_items/items_bar.png"],
            Look::Nail => &["graphics/items/round3/nail.png"],
            Look::Cage => &["graphics/items/round5/cage.png"],
            Look::Flowerpot => &["graphics/items/round6/flowerpot.png"],
            Look::Horn => &["graphics/items/player_items/horn.png"],
            Look::FirstAidKit => &["graphics/items/player_items/first_aid_kit.png"],
            Look::Saw => &["graphics/items/player_items/saw.png"],
            Look::Carrot => &["graphics/items/player_items/carrot.png"],
            Look::Seed => &["graphics/items/player_items/seed.png"],
            Look::Shovel => &["graphics/items/player_items/shovel.png"],
            Look::WateringCan => &["graphics/items/player_items/watering_can.png"],
            Look::Speaker => &["graphics/items/player_items/speaker.png"],
            Look::SkipButton => &["graphics/items/game_control/skip_button.png"],
            Look::PlayAgainButton => &["graphics/items/game_control/play_again_btn.png"],
        }
    }

    pub fn frame_count(self) -> usize {
        self.frames().len()
    }

    /// On-screen size after scaling, in logical pixels.
    pub fn size(self) -> Vec2 {
        let (w, h) = match self {
            Look::PlayerRun => (70.0, 110.0),
            Look::Fairy => (80.0, 100.0),
            Look::RhinoBefore => (200.0, 130.0),
            Look::RhinoAfter => (172.0, 112.0),
            Look::RhinoDie => (200.0, 110.0),
            Look::LionRun => (180.0, 120.0),
            Look::LionWin => (150.0, 140.0),
            Look::LionDie => (180.0, 90.0),
            Look::LionHurt => (170.0, 110.0),
            Look::RabbitRun => (90.0, 80.0),
            Look::RabbitCry => (80.0, 100.0),
            Look::ElephantRun => (220.0, 170.0),
            Look::Man1Walk | Look::Man2Walk => (70.0, 120.0),
            Look::StartButton => (180.0, 70.0),
            Look::GameLabel => (520.0, 160.0),
            Look::EarthWhole | Look::EarthHealed => (300.0, 300.0),
            Look::Mouse => (60.0, 90.0),
            Look::Arrow => (120.0, 60.0),
            Look::ItemsBar => (480.0, 90.0),
            Look::Nail => (30.0, 40.0),
            Look::Cage => (240.0, 200.0),
            Look::Flowerpot => (80.0, 80.0),
            Look::Horn => (60.0, 60.0),
            Look::FirstAidKit => (60.0, 55.0),
            Look::Saw => (80.0, 40.0),
            Look::Carrot => (70.0, 50.0),
            Look::Seed => (40.0, 40.0),
            Look::Shovel => (50.0, 90.0),
            Look::WateringCan => (80.0, 60.0),
            Look::Speaker => (60.0, 60.0),
            Look::SkipButton => (60.0, 40.0),
            Look::PlayAgainButton => (220.0, 80.0),
        };
        Vec2::new(w, h)
    }

    /// Art drawn facing left; everything else faces right.
    pub fn faces_left(self) -> bool {
        matches!(self, Look::RhinoBefore)
    }
}

/// Voice lines. Playing one stops whatever line was playing before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
pub enum VoiceLine {
    PlayerSupplies,
    PlayerHelpLion,
    PlayerLionSaved,
    PlayerSeeRabbit,
    PlayerThankRabbit,
    PlayerReplyRabbit,
    PlayerElephantCaged,
    PlayerThankElephant,
    PlayerByeElephant,
    PlayerGardenSurprise,
    PlayerNewWorld,
    PlayerFarewell,
    PlayerMegaphone,
    FairyIntro,
    FairySupplies,
    FairyRhino,
    FairyGarden,
    FairyNewWorld,
    RhinoCall,
    RhinoThanks,
    RhinoDie,
    LionNail,
    LionThanks,
    LionDie,
    RabbitHungry,
    RabbitFed,
    RabbitThanks,
    RabbitDie,
    ElephantHelp,
    ElephantFreed,
    ElephantReply,
}

impl VoiceLine {
    pub fn path(self) -> &'static str {
        match self {
            VoiceLine::PlayerSupplies => "sound/player/round1_1.wav",
            VoiceLine::PlayerHelpLion => "sound/player/round3_help_lion.wav",
            VoiceLine::PlayerLionSaved => "sound/player/round3_win.wav",
            VoiceLine::PlayerSeeRabbit => "sound/player/round4_see_rabbit.wav",
            VoiceLine::PlayerThankRabbit => "sound/player/round4_thanks.wav",
            VoiceLine::PlayerReplyRabbit => "sound/player/round4_reply.wav",
            VoiceLine::PlayerElephantCaged => "sound/player/round5_start.wav",
            VoiceLine::PlayerThankElephant => "sound/player/round5_thanks.wav",
            VoiceLine::PlayerByeElephant => "sound/player/round5_bye.wav",
            VoiceLine::PlayerGardenSurprise => "sound/player/round6_1_start.wav",
            VoiceLine::PlayerNewWorld => "sound/player/round6_2_win.wav",
            VoiceLine::PlayerFarewell => "sound/player/round6_2_end.wav",
            VoiceLine::PlayerMegaphone => "sound/player/round7_win.wav",
            VoiceLine::FairyIntro => "sound/fairy/intro.wav",
            VoiceLine::FairySupplies => "sound/fairy/round1.wav",
            VoiceLine::FairyRhino => "sound/fairy/round2.wav",
            VoiceLine::FairyGarden => "sound/fairy/round6_1.wav",
            VoiceLine::FairyNewWorld => "sound/fairy/round6_2.wav",
            VoiceLine::RhinoCall => "sound/rhino/rhino.wav",
            VoiceLine::RhinoThanks => "sound/rhino/rhino_win.wav",
            VoiceLine::RhinoDie => "sound/rhino/rhino_die.wav",
            VoiceLine::LionNail => "sound/lion/touch_nail.wav",
            VoiceLine::LionThanks => "sound/lion/win.wav",
            VoiceLine::LionDie => "sound/lion/die.wav",
            VoiceLine::RabbitHungry => "sound/rabbit/rabbit_hungry.wav",
            VoiceLine::RabbitFed => "sound/rabbit/rabbit_get_food.wav",
            VoiceLine::RabbitThanks => "sound/rabbit/rabbit_win.wav",
            VoiceLine::RabbitDie => "sound/rabbit/rabbit_die.wav",
            VoiceLine::ElephantHelp => "sound/elephant/elephant_start.wav",
            VoiceLine::ElephantFreed => "sound/elephant/elephant_win.wav",
            VoiceLine::ElephantReply => "sound/elephant/elephant_reply.wav",
        }
    }
}

pub const MUSIC_PATH: &str = "sound/music/in_game_music.wav";

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_look_has_frames_and_a_size() {
        for look in Look::iter() {
            assert!(look.frame_count() > 0, "{look:?}");
            assert!(look.size().min_element() > 0.0, "{look:?}");
        }
    }

    #[test]
    fn buttons_and_items_are_disjoint() {
        for role in Role::iter() {
            assert!(!(role.is_item() && role.is_button()), "{role:?}");
        }
    }

    #[test]
    fn round_props_do_not_carry_over() {
        assert!(Role::Player.carries_over());
        assert!(Role::Saw.carries_over());
        assert!(!Role::Rhino.carries_over());
        assert!(!Role::SkipButton.carries_over());
    }
}
