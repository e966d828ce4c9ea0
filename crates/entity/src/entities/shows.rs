use sea_orm::entity::prelude::*;

/// A booking of an artist at a venue.
///
/// An artist can only be booked once per venue.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "shows")]
pub struct Model {
    /// The ID of the venue hosting the show.
    #[sea_orm(primary_key, auto_increment = false)]
    pub venue_id: i32,
    /// The ID of the artist playing the show.
    #[sea_orm(primary_key, auto_increment = false)]
    pub artist_id: i32,
    /// The UTC date of the start of the show.
    pub start_time: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::venues::Entity",
        from = "Column::VenueId",
        to = "super::venues::Column::Id",
        on_update = "Restrict",
        on_delete = "Cascade"
    )]
    Venues,
    #[sea_orm(
        belongs_to = "super::artists::Entity",
        from = "Column::ArtistId",
        to = "super::artists::Column::Id",
        on_update = "Restrict",
        on_delete = "Cascade"
    )]
    Artists,
}

impl Related<super::venues::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Venues.def()
    }
}

impl Related<super::artists::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Artists.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
