pub use super::artist_genres::Entity as ArtistGenres;
pub use super::artists::Entity as Artists;
pub use super::shows::Entity as Shows;
pub use super::venue_genres::Entity as VenueGenres;
pub use super::venues::Entity as Venues;
