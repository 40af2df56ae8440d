pub mod anilist;
pub mod oauth;
pub mod transport;
