use crate::store::{Playlist, Song, User};
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Serialize, Debug)]
pub struct AuthSuccessResponse {
    pub message: &'static str,
    pub user: User,
}

#[derive(Serialize, Debug)]
pub struct ProfileResponse {
    pub user: User,
}

#[derive(Serialize, Debug)]
pub struct PlaylistWithSongs {
    pub playlist: Playlist,
    pub songs: Vec<Song>,
}
