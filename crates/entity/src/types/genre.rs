use std::{fmt, str::FromStr};

use sea_orm::entity::prelude::*;

/// A music genre, stored as its display name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(40))")]
pub enum Genre {
    #[sea_orm(string_value = "Alternative")]
    Alternative,
    #[sea_orm(string_value = "Blues")]
    Blues,
    #[sea_orm(string_value = "Classical")]
    Classical,
    #[sea_orm(string_value = "Country")]
    Country,
    #[sea_orm(string_value = "Electronic")]
    Electronic,
    #[sea_orm(string_value = "Folk")]
    Folk,
    #[sea_orm(string_value = "Funk")]
    Funk,
    #[sea_orm(string_value = "Hip-Hop")]
    HipHop,
    #[sea_orm(string_value = "Heavy Metal")]
    HeavyMetal,
    #[sea_orm(string_value = "Instrumental")]
    Instrumental,
    #[sea_orm(string_value = "Jazz")]
    Jazz,
    #[sea_orm(string_value = "Musical Theatre")]
    MusicalTheatre,
    #[sea_orm(string_value = "Pop")]
    Pop,
    #[sea_orm(string_value = "Punk")]
    Punk,
    #[sea_orm(string_value = "R&B")]
    RAndB,
    #[sea_orm(string_value = "Reggae")]
    Reggae,
    #[sea_orm(string_value = "Rock n Roll")]
    RockNRoll,
    #[sea_orm(string_value = "Soul")]
    Soul,
    #[sea_orm(string_value = "Swing")]
    Swing,
    #[sea_orm(string_value = "Other")]
    Other,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown genre `{0}`")]
pub struct GenreParseError(pub String);

impl FromStr for Genre {
    type Err = GenreParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from_value(&s.to_owned()).map_err(|_| GenreParseError(s.to_owned()))
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_value())
    }
}

impl serde::Serialize for Genre {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_value())
    }
}

impl<'de> serde::Deserialize<'de> for Genre {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str> as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
