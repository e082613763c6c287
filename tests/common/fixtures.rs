//! Test data loaded into every test server's store.

use super::constants::*;
use anyhow::Result;
use tunescout_server::store::{FullStore, NewPlaylist, NewSong, PlaylistStore, SongStore};
use tunescout_server::UserManager;

/// Ids of the records created by `populate_store`.
pub struct Fixtures {
    pub test_user_id: String,
    pub other_user_id: String,
    pub song_ids: Vec<String>,
    pub playlist_id: String,
}

/// Registers the two test users, three songs owned by the test user and a
/// playlist holding the first two songs.
pub fn populate_store(store: &dyn FullStore, user_manager: &UserManager) -> Result<Fixtures> {
    let test_user = user_manager.register(TEST_USER, TEST_EMAIL, TEST_PASS)?;
    let other_user = user_manager.register(OTHER_USER, OTHER_EMAIL, OTHER_PASS)?;

    let songs = [
        (SONG_1_TITLE, SONG_1_ARTIST, Some(SONG_1_ALBUM), 354),
        (SONG_2_TITLE, SONG_2_ARTIST, None, 391),
        (SONG_3_TITLE, SONG_3_ARTIST, None, 183),
    ];
    let mut song_ids = Vec::new();
    for (title, artist, album, duration) in songs {
        let song = store.create_song(NewSong {
            title: title.to_string(),
            artist: artist.to_string(),
            album: album.map(str::to_string),
            duration,
            url: format!("https://example.com/{}.mp3", song_ids.len() + 1),
            cover_image: None,
            user_id: test_user.id.clone(),
        });
        song_ids.push(song.id);
        // Keeps createdAt strictly increasing.
        std::thread::sleep(std::time::Duration::from_millis(2));
    }

    let playlist = store.create_playlist(NewPlaylist {
        name: PLAYLIST_NAME.to_string(),
        description: Some("Songs for the highway".to_string()),
        user_id: test_user.id.clone(),
        is_public: true,
    });
    store.add_song_to_playlist(&playlist.id, &song_ids[0], &test_user.id)?;
    store.add_song_to_playlist(&playlist.id, &song_ids[1], &test_user.id)?;

    Ok(Fixtures {
        test_user_id: test_user.id,
        other_user_id: other_user.id,
        song_ids,
        playlist_id: playlist.id,
    })
}
