//! Demo content loaded into a fresh store at startup.

use super::models::{NewPlaylist, NewSong, NewUser};
use super::record_store::{
    CommentStore, FullStore, LikeStore, PlaylistStore, SongStore, StoreError, UserStore,
};
use tracing::info;

pub const SAMPLE_USERS: [(&str, &str); 2] = [
    ("demo_user", "demo@example.com"),
    ("music_lover", "music@example.com"),
];

/// Password shared by every sample user.
pub const SAMPLE_PASSWORD: &str = "password123";

struct SampleSong {
    title: &'static str,
    artist: &'static str,
    album: &'static str,
    duration: u32,
    slug: &'static str,
    owner: usize,
}

const SAMPLE_SONGS: [SampleSong; 4] = [
    SampleSong {
        title: "Bohemian Rhapsody",
        artist: "Queen",
        album: "A Night at the Opera",
        duration: 354,
        slug: "bohemian-rhapsody",
        owner: 0,
    },
    SampleSong {
        title: "Hotel California",
        artist: "Eagles",
        album: "Hotel California",
        duration: 391,
        slug: "hotel-california",
        owner: 0,
    },
    SampleSong {
        title: "Imagine",
        artist: "John Lennon",
        album: "Imagine",
        duration: 183,
        slug: "imagine",
        owner: 1,
    },
    SampleSong {
        title: "Stairway to Heaven",
        artist: "Led Zeppelin",
        album: "Led Zeppelin IV",
        duration: 482,
        slug: "stairway-to-heaven",
        owner: 1,
    },
];

/// Populates the store with two users, four songs, two playlists and a few
/// likes and comments. `password_hash` is the hash of `SAMPLE_PASSWORD`.
pub fn seed_sample_data(store: &dyn FullStore, password_hash: &str) -> Result<(), StoreError> {
    let mut user_ids = Vec::with_capacity(SAMPLE_USERS.len());
    for (username, email) in SAMPLE_USERS {
        let user = store.create_user(NewUser {
            username: username.to_owned(),
            email: email.to_owned(),
            password_hash: password_hash.to_owned(),
        })?;
        user_ids.push(user.id);
    }

    let song_ids: Vec<String> = SAMPLE_SONGS
        .iter()
        .map(|sample| {
            store
                .create_song(NewSong {
                    title: sample.title.to_owned(),
                    artist: sample.artist.to_owned(),
                    album: Some(sample.album.to_owned()),
                    duration: sample.duration,
                    url: format!("https://example.com/{}.mp3", sample.slug),
                    cover_image: Some(format!("https://example.com/{}.jpg", sample.slug)),
                    user_id: user_ids[sample.owner].clone(),
                })
                .id
        })
        .collect();

    let classic_rock = store.create_playlist(NewPlaylist {
        name: "Classic Rock".to_owned(),
        description: Some("The best classic rock songs".to_owned()),
        user_id: user_ids[0].clone(),
        is_public: true,
    });
    let chill_vibes = store.create_playlist(NewPlaylist {
        name: "Chill Vibes".to_owned(),
        description: Some("Relaxing music for any mood".to_owned()),
        user_id: user_ids[1].clone(),
        is_public: true,
    });

    store.add_song_to_playlist(&classic_rock.id, &song_ids[0], &user_ids[0])?;
    store.add_song_to_playlist(&classic_rock.id, &song_ids[1], &user_ids[0])?;
    store.add_song_to_playlist(&chill_vibes.id, &song_ids[2], &user_ids[1])?;

    store.create_like(&user_ids[0], &song_ids[2]);
    store.create_like(&user_ids[1], &song_ids[0]);

    store.create_comment(
        &user_ids[0],
        &song_ids[2],
        "This song is absolutely beautiful!",
    );
    store.create_comment(&user_ids[1], &song_ids[0], "A true masterpiece!");

    info!(
        "Seeded sample data: {} users, {} songs, 2 playlists",
        user_ids.len(),
        song_ids.len()
    );
    Ok(())
}
