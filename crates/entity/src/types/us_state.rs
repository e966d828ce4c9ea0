use std::{fmt, str::FromStr};

use sea_orm::entity::prelude::*;

/// A US state, stored as its two-letter postal code.
///
/// The variants are listed in the same order as the choices of the submission forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(2))")]
pub enum UsState {
    #[sea_orm(string_value = "AL")]
    Alabama,
    #[sea_orm(string_value = "AK")]
    Alaska,
    #[sea_orm(string_value = "AZ")]
    Arizona,
    #[sea_orm(string_value = "AR")]
    Arkansas,
    #[sea_orm(string_value = "CA")]
    California,
    #[sea_orm(string_value = "CO")]
    Colorado,
    #[sea_orm(string_value = "CT")]
    Connecticut,
    #[sea_orm(string_value = "DE")]
    Delaware,
    #[sea_orm(string_value = "DC")]
    DistrictOfColumbia,
    #[sea_orm(string_value = "FL")]
    Florida,
    #[sea_orm(string_value = "GA")]
    Georgia,
    #[sea_orm(string_value = "HI")]
    Hawaii,
    #[sea_orm(string_value = "ID")]
    Idaho,
    #[sea_orm(string_value = "IL")]
    Illinois,
    #[sea_orm(string_value = "IN")]
    Indiana,
    #[sea_orm(string_value = "IA")]
    Iowa,
    #[sea_orm(string_value = "KS")]
    Kansas,
    #[sea_orm(string_value = "KY")]
    Kentucky,
    #[sea_orm(string_value = "LA")]
    Louisiana,
    #[sea_orm(string_value = "ME")]
    Maine,
    #[sea_orm(string_value = "MT")]
    Montana,
    #[sea_orm(string_value = "NE")]
    Nebraska,
    #[sea_orm(string_value = "NV")]
    Nevada,
    #[sea_orm(string_value = "NH")]
    NewHampshire,
    #[sea_orm(string_value = "NJ")]
    NewJersey,
    #[sea_orm(string_value = "NM")]
    NewMexico,
    #[sea_orm(string_value = "NY")]
    NewYork,
    #[sea_orm(string_value = "NC")]
    NorthCarolina,
    #[sea_orm(string_value = "ND")]
    NorthDakota,
    #[sea_orm(string_value = "OH")]
    Ohio,
    #[sea_orm(string_value = "OK")]
    Oklahoma,
    #[sea_orm(string_value = "OR")]
    Oregon,
    #[sea_orm(string_value = "MD")]
    Maryland,
    #[sea_orm(string_value = "MA")]
    Massachusetts,
    #[sea_orm(string_value = "MI")]
    Michigan,
    #[sea_orm(string_value = "MN")]
    Minnesota,
    #[sea_orm(string_value = "MS")]
    Mississippi,
    #[sea_orm(string_value = "MO")]
    Missouri,
    #[sea_orm(string_value = "PA")]
    Pennsylvania,
    #[sea_orm(string_value = "RI")]
    RhodeIsland,
    #[sea_orm(string_value = "SC")]
    SouthCarolina,
    #[sea_orm(string_value = "SD")]
    SouthDakota,
    #[sea_orm(string_value = "TN")]
    Tennessee,
    #[sea_orm(string_value = "TX")]
    Texas,
    #[sea_orm(string_value = "UT")]
    Utah,
    #[sea_orm(string_value = "VT")]
    Vermont,
    #[sea_orm(string_value = "VA")]
    Virginia,
    #[sea_orm(string_value = "WA")]
    Washington,
    #[sea_orm(string_value = "WV")]
    WestVirginia,
    #[sea_orm(string_value = "WI")]
    Wisconsin,
    #[sea_orm(string_value = "WY")]
    Wyoming,
}

impl UsState {
    /// Returns the two-letter postal code of the state.
    pub fn code(self) -> String {
        self.to_value()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown US state code `{0}`")]
pub struct UsStateParseError(pub String);

impl FromStr for UsState {
    type Err = UsStateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from_value(&s.to_owned()).map_err(|_| UsStateParseError(s.to_owned()))
    }
}

impl fmt::Display for UsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_value())
    }
}

impl serde::Serialize for UsState {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_value())
    }
}

impl<'de> serde::Deserialize<'de> for UsState {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str> as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::UsState;

    #[test]
    fn parses_postal_codes() {
        assert_eq!("CA".parse::<UsState>().ok(), Some(UsState::California));
        assert_eq!(
            "DC".parse::<UsState>().ok(),
            Some(UsState::DistrictOfColumbia)
        );
        assert!("ca".parse::<UsState>().is_err());
        assert!("XX".parse::<UsState>().is_err());
    }

    #[test]
    fn displays_postal_code() {
        assert_eq!(UsState::NewYork.to_string(), "NY");
    }
}
