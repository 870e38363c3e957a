// Sound: background music plus the single voice channel the story runs on.
use std::collections::HashMap;

use bevy::prelude::*;
use strum::IntoEnumIterator;

use crate::cast::{VoiceLine, MUSIC_PATH};
use crate::context::{Cue, VoiceTicket};
use crate::director::{CueMessage, FinishedVoices};

pub struct MediaPlugin;

impl Plugin for MediaPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<VoiceChannels>()
            .add_systems(Startup, (load_sounds, start_music).chain())
            .add_systems(Update, (play_voice_cues, report_finished_voices).chain());
    }
}

#[derive(Resource)]
pub struct SoundBank {
    voices: HashMap<VoiceLine, Handle<AudioSource>>,
    music: Handle<AudioSource>,
}

/// Marks the entity playing a voice line.
#[derive(Component)]
pub struct VoiceChannel(pub VoiceTicket);

/// Live voice entities and the playback each one carries. Kept outside the
/// components so the ticket is still known after the entity is gone.
#[derive(Resource, Default)]
pub struct VoiceChannels(HashMap<Entity, VoiceTicket>);

fn load_sounds(mut commands: Commands, assets: Res<AssetServer>) {
    let voices = VoiceLine::iter()
        .map(|line| (line, assets.load(line.path())))
        .collect();
    commands.insert_resource(SoundBank {
        voices,
        music: assets.load(MUSIC_PATH),
    });
}

fn start_music(mut commands: Commands, bank: Res<SoundBank>) {
    commands.spawn((
        Name::new("Music"),
        AudioPlayer::new(bank.music.clone()),
        PlaybackSettings::LOOP,
    ));
}

fn play_voice_cues(
    mut commands: Commands,
    mut cues: MessageReader<CueMessage>,
    bank: Res<SoundBank>,
    mut channels: ResMut<VoiceChannels>,
) {
    for CueMessage(cue) in cues.read() {
        let line = match cue {
            Cue::Voice { line, ticket } => Some((*line, *ticket)),
            Cue::Silence => None,
            Cue::Backdrop(_) => continue,
        };

        // Cut off whatever is playing, including lines started earlier this frame.
        for (entity, _) in channels.0.drain() {
            commands.entity(entity).try_despawn();
        }

        let Some((line, ticket)) = line else {
            continue;
        };
        let Some(handle) = bank.voices.get(&line) else {
            warn!("no sound loaded for {line:?}");
            continue;
        };
        let entity = commands
            .spawn((
                Name::new(<&'static str>::from(line)),
                VoiceChannel(ticket),
                AudioPlayer::new(handle.clone()),
                PlaybackSettings::DESPAWN,
            ))
            .id();
        channels.0.insert(entity, ticket);
    }
}

fn report_finished_voices(
    mut removed: RemovedComponents<VoiceChannel>,
    mut channels: ResMut<VoiceChannels>,
    mut finished: ResMut<FinishedVoices>,
) {
    for entity in removed.read() {
        if let Some(ticket) = channels.0.remove(&entity) {
            finished.tickets.push(ticket);
        }
    }
}
