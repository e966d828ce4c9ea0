use sea_orm::entity::prelude::*;

use crate::types::UsState;

/// A performer who can be booked for shows.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "artists")]
pub struct Model {
    /// The artist ID.
    #[sea_orm(primary_key)]
    pub id: i32,
    /// The name of the artist.
    pub name: String,
    /// The home city of the artist.
    #[sea_orm(column_type = "String(StringLen::N(120))")]
    pub city: String,
    /// The home US state of the artist.
    pub state: UsState,
    #[sea_orm(column_type = "String(StringLen::N(120))", nullable)]
    pub phone: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(500))", nullable)]
    pub image_link: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(120))", nullable)]
    pub facebook_link: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(500))", nullable)]
    pub website: Option<String>,
    /// Whether the artist is looking for venues to play in.
    pub seeking_venue: bool,
    /// The text displayed when the artist is looking for venues.
    #[sea_orm(column_type = "Text", nullable)]
    pub seeking_description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::shows::Entity")]
    Shows,
    #[sea_orm(has_many = "super::artist_genres::Entity")]
    ArtistGenres,
}

impl Related<super::shows::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shows.def()
    }
}

impl Related<super::artist_genres::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArtistGenres.def()
    }
}

impl Related<super::venues::Entity> for Entity {
    fn to() -> RelationDef {
        super::shows::Relation::Venues.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::shows::Relation::Artists.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
