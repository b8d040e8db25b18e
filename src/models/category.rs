use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Body region a garment is worn on; the `category` of a try-on request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BodyRegion {
    UpperBody,
    LowerBody,
}

impl BodyRegion {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyRegion::UpperBody => "upper_body",
            BodyRegion::LowerBody => "lower_body",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "upper_body" => Some(BodyRegion::UpperBody),
            "lower_body" => Some(BodyRegion::LowerBody),
            _ => None,
        }
    }
}

/// Gender + body region, stored as e.g. `"male upper_body"`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ProductCategory {
    pub gender: Gender,
    pub region: BodyRegion,
}

impl ProductCategory {
    pub const fn new(gender: Gender, region: BodyRegion) -> Self {
        Self { gender, region }
    }

    pub fn all() -> &'static [ProductCategory] {
        static ALL: [ProductCategory; 4] = [
            ProductCategory::new(Gender::Male, BodyRegion::UpperBody),
            ProductCategory::new(Gender::Male, BodyRegion::LowerBody),
            ProductCategory::new(Gender::Female, BodyRegion::UpperBody),
            ProductCategory::new(Gender::Female, BodyRegion::LowerBody),
        ];
        &ALL
    }

    /// Heading used by the admin dashboard
    pub fn title(&self) -> &'static str {
        match (self.gender, self.region) {
            (Gender::Male, BodyRegion::UpperBody) => "Men's Tops",
            (Gender::Male, BodyRegion::LowerBody) => "Men's Bottoms",
            (Gender::Female, BodyRegion::UpperBody) => "Women's Tops",
            (Gender::Female, BodyRegion::LowerBody) => "Women's Bottoms",
        }
    }
}

impl Default for ProductCategory {
    fn default() -> Self {
        ProductCategory::new(Gender::Male, BodyRegion::LowerBody)
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.gender.as_str(), self.region.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::Validation(format!("Unknown category: '{}'", s));

        let mut parts = s.split_whitespace();
        let gender = parts.next().and_then(Gender::parse).ok_or_else(invalid)?;
        let region = parts.next().and_then(BodyRegion::parse).ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(ProductCategory::new(gender, region))
    }
}

impl TryFrom<String> for ProductCategory {
    type Error = AppError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ProductCategory> for String {
    fn from(category: ProductCategory) -> Self {
        category.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trips_through_string() {
        for category in ProductCategory::all() {
            let parsed: ProductCategory = category.to_string().parse().unwrap();
            assert_eq!(&parsed, category);
        }
        assert_eq!(
            ProductCategory::new(Gender::Female, BodyRegion::UpperBody).to_string(),
            "female upper_body"
        );
    }

    #[test]
    fn test_category_rejects_garbage() {
        assert!("male".parse::<ProductCategory>().is_err());
        assert!("male torso".parse::<ProductCategory>().is_err());
        assert!("male upper_body extra".parse::<ProductCategory>().is_err());
        assert!("".parse::<ProductCategory>().is_err());
    }

    #[test]
    fn test_category_serde_as_string() {
        let category = ProductCategory::new(Gender::Male, BodyRegion::LowerBody);
        let json = serde_json::to_string(&category).unwrap();
        assert_eq!(json, "\"male lower_body\"");

        let back: ProductCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, category);
        assert!(serde_json::from_str::<ProductCategory>("\"kids upper_body\"").is_err());
    }

    #[test]
    fn test_titles() {
        assert_eq!(ProductCategory::default().title(), "Men's Bottoms");
        assert_eq!(
            ProductCategory::new(Gender::Female, BodyRegion::UpperBody).title(),
            "Women's Tops"
        );
    }
}
