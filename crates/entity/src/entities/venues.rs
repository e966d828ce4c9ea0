use sea_orm::entity::prelude::*;

use crate::types::UsState;

/// A venue hosting shows.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "venues")]
pub struct Model {
    /// The venue ID.
    #[sea_orm(primary_key)]
    pub id: i32,
    /// The name of the venue.
    pub name: String,
    /// The city where the venue is located.
    #[sea_orm(column_type = "String(StringLen::N(120))")]
    pub city: String,
    /// The US state where the venue is located.
    pub state: UsState,
    /// The street address of the venue.
    #[sea_orm(column_type = "String(StringLen::N(120))")]
    pub address: String,
    #[sea_orm(column_type = "String(StringLen::N(120))", nullable)]
    pub phone: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(500))", nullable)]
    pub image_link: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(120))", nullable)]
    pub facebook_link: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(500))", nullable)]
    pub website: Option<String>,
    /// Whether the venue is looking for artists to book.
    pub seeking_talent: bool,
    /// The text displayed when the venue is looking for artists.
    #[sea_orm(column_type = "Text", nullable)]
    pub seeking_description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::shows::Entity")]
    Shows,
    #[sea_orm(has_many = "super::venue_genres::Entity")]
    VenueGenres,
}

impl Related<super::shows::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shows.def()
    }
}

impl Related<super::venue_genres::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VenueGenres.def()
    }
}

impl Related<super::artists::Entity> for Entity {
    fn to() -> RelationDef {
        super::shows::Relation::Artists.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::shows::Relation::Venues.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
