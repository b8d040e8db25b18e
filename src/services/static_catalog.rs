//! Built-in products shown to shoppers and used when a product id is unknown.

use crate::models::{BodyRegion, Gender, Product, ProductCategory};

/// Owner of the built-in entries; never matches a real admin
pub const STATIC_OWNER: &str = "catalog@virtual-vogue.local";

struct Entry {
    id: &'static str,
    name: &'static str,
    price: f64,
    image: &'static str,
    description: &'static str,
}

const MALE_TOPS: &[Entry] = &[
    Entry {
        id: "1",
        name: "Classic White Shirt",
        price: 29.99,
        image: "catalog/male-upper-1.png",
        description: "Crisp cotton shirt with a regular fit.",
    },
    Entry {
        id: "2",
        name: "Navy Crew Sweater",
        price: 44.5,
        image: "catalog/male-upper-2.png",
        description: "Soft knit sweater for cooler days.",
    },
    Entry {
        id: "3",
        name: "Denim Jacket",
        price: 69.0,
        image: "catalog/male-upper-3.png",
        description: "Washed denim with button front.",
    },
];

const MALE_BOTTOMS: &[Entry] = &[
    Entry {
        id: "1",
        name: "Slim Chinos",
        price: 39.99,
        image: "catalog/male-lower-1.png",
        description: "Stretch chinos in khaki.",
    },
    Entry {
        id: "2",
        name: "Dark Wash Jeans",
        price: 54.0,
        image: "catalog/male-lower-2.png",
        description: "Straight leg jeans.",
    },
];

const FEMALE_TOPS: &[Entry] = &[
    Entry {
        id: "1",
        name: "Silk Blouse",
        price: 59.0,
        image: "catalog/female-upper-1.png",
        description: "Lightweight blouse with a relaxed drape.",
    },
    Entry {
        id: "2",
        name: "Striped Tee",
        price: 19.99,
        image: "catalog/female-upper-2.png",
        description: "Breton stripes in organic cotton.",
    },
    Entry {
        id: "3",
        name: "Cropped Cardigan",
        price: 42.0,
        image: "catalog/female-upper-3.png",
        description: "Fine knit cardigan.",
    },
];

const FEMALE_BOTTOMS: &[Entry] = &[
    Entry {
        id: "1",
        name: "Pleated Midi Skirt",
        price: 49.0,
        image: "catalog/female-lower-1.png",
        description: "Flowing skirt with an elastic waist.",
    },
    Entry {
        id: "2",
        name: "Wide Leg Trousers",
        price: 57.5,
        image: "catalog/female-lower-2.png",
        description: "High waisted tailored trousers.",
    },
];

/// Images compiled into the binary, keyed by the path used in the entries above
const BUNDLED_IMAGES: &[(&str, &[u8])] = &[
    ("catalog/male-upper-1.png", include_bytes!("../../assets/catalog/male-upper-1.png")),
    ("catalog/male-upper-2.png", include_bytes!("../../assets/catalog/male-upper-2.png")),
    ("catalog/male-upper-3.png", include_bytes!("../../assets/catalog/male-upper-3.png")),
    ("catalog/male-lower-1.png", include_bytes!("../../assets/catalog/male-lower-1.png")),
    ("catalog/male-lower-2.png", include_bytes!("../../assets/catalog/male-lower-2.png")),
    ("catalog/female-upper-1.png", include_bytes!("../../assets/catalog/female-upper-1.png")),
    ("catalog/female-upper-2.png", include_bytes!("../../assets/catalog/female-upper-2.png")),
    ("catalog/female-upper-3.png", include_bytes!("../../assets/catalog/female-upper-3.png")),
    ("catalog/female-lower-1.png", include_bytes!("../../assets/catalog/female-lower-1.png")),
    ("catalog/female-lower-2.png", include_bytes!("../../assets/catalog/female-lower-2.png")),
    ("models/image1.png", include_bytes!("../../assets/models/image1.png")),
    ("models/image2.png", include_bytes!("../../assets/models/image2.png")),
    ("models/image3.png", include_bytes!("../../assets/models/image3.png")),
    ("models/image4.png", include_bytes!("../../assets/models/image4.png")),
    ("models/image5.png", include_bytes!("../../assets/models/image5.png")),
    ("models/image6.png", include_bytes!("../../assets/models/image6.png")),
];

/// Bytes of a built-in product or model image
pub fn bundled_image(path: &str) -> Option<&'static [u8]> {
    BUNDLED_IMAGES
        .iter()
        .find(|(key, _)| *key == path)
        .map(|(_, bytes)| *bytes)
}

fn entries(category: ProductCategory) -> &'static [Entry] {
    match (category.gender, category.region) {
        (Gender::Male, BodyRegion::UpperBody) => MALE_TOPS,
        (Gender::Male, BodyRegion::LowerBody) => MALE_BOTTOMS,
        (Gender::Female, BodyRegion::UpperBody) => FEMALE_TOPS,
        (Gender::Female, BodyRegion::LowerBody) => FEMALE_BOTTOMS,
    }
}

fn to_product(category: ProductCategory, entry: &Entry) -> Product {
    Product {
        id: entry.id.to_string(),
        legacy_id: None,
        category,
        name: entry.name.to_string(),
        price: entry.price,
        image: entry.image.to_string(),
        description: entry.description.to_string(),
        email: STATIC_OWNER.to_string(),
    }
}

pub fn products(category: ProductCategory) -> Vec<Product> {
    entries(category)
        .iter()
        .map(|entry| to_product(category, entry))
        .collect()
}

/// Ids are only unique within a category
pub fn find(category: ProductCategory, id: &str) -> Option<Product> {
    entries(category)
        .iter()
        .find(|entry| entry.id == id)
        .map(|entry| to_product(category, entry))
}

/// Example model photos offered on the human photo step, three per gender
pub fn example_models(gender: Gender) -> [&'static str; 3] {
    match gender {
        Gender::Male => [
            "models/image1.png",
            "models/image2.png",
            "models/image3.png",
        ],
        Gender::Female => [
            "models/image4.png",
            "models/image5.png",
            "models/image6.png",
        ],
    }
}
