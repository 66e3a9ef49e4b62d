//! In-process fallback tables used when the lookup store has nothing.
//!
//! Keys are lowercase. Lists are in priority order.

pub(crate) type Table = &'static [(&'static str, &'static [&'static str])];

/// Entries for `key`, or an empty slice.
pub(crate) fn entries(table: Table, key: &str) -> &'static [&'static str] {
    if key.is_empty() {
        return &[];
    }
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, values)| *values)
        .unwrap_or(&[])
}

// ---------------------------------------------------------------------------
// Discussion communities
// ---------------------------------------------------------------------------

pub(crate) const COMMUNITIES_BY_CATEGORY: Table = &[
    ("technology", &["technology", "gadgets", "techsupport", "hardware", "BuyItForLife"]),
    ("beauty", &["SkincareAddiction", "MakeupAddiction", "AsianBeauty", "beauty", "Sephora"]),
    ("fitness", &["Fitness", "bodyweightfitness", "homegym", "loseit", "GYM"]),
    ("food", &["food", "Cooking", "EatCheapAndHealthy", "recipes", "HealthyFood"]),
    ("fashion", &["malefashionadvice", "femalefashionadvice", "streetwear", "frugalmalefashion"]),
    ("home", &["HomeImprovement", "InteriorDesign", "organization", "BuyItForLife", "DIY"]),
    ("gaming", &["gaming", "pcgaming", "Games", "NintendoSwitch", "PS5"]),
    ("pets", &["Pets", "dogs", "cats", "DogTraining", "Aquariums"]),
];

pub(crate) const COMMUNITIES_BY_SUBCATEGORY: Table = &[
    ("yoga", &["yoga", "flexibility", "Meditation"]),
    ("running", &["running", "AdvancedRunning", "RunningShoeGeeks"]),
    ("cycling", &["cycling", "bicycling", "whichbike"]),
    ("skincare", &["SkincareAddiction", "30PlusSkinCare", "SkincareAddicts"]),
    ("makeup", &["MakeupAddiction", "makeupexchange", "BeautyGuruChatter"]),
    ("haircare", &["HaircareScience", "curlyhair", "Hair"]),
    ("coffee", &["Coffee", "espresso", "pourover"]),
    ("snacks", &["snacks", "HealthyFood", "EatCheapAndHealthy"]),
    ("headphones", &["headphones", "audiophile", "HeadphoneAdvice"]),
    ("keyboards", &["MechanicalKeyboards", "BudgetKeebs"]),
    ("smartphones", &["Android", "iphone", "PickAnAndroidForMe"]),
    ("sneakers", &["Sneakers", "RunningShoeGeeks", "Repsneakers"]),
    ("furniture", &["furniture", "InteriorDesign", "malelivingspace"]),
    ("kitchen", &["Cooking", "BuyItForLife", "castiron"]),
    ("dogs", &["dogs", "DogTraining", "puppy101"]),
    ("cats", &["cats", "CatAdvice", "catcare"]),
];

pub(crate) const COMMUNITIES_BY_GENDER: Table = &[
    ("female", &["TwoXChromosomes", "AskWomen", "femalefashionadvice"]),
    ("male", &["AskMen", "malefashionadvice", "malegrooming"]),
];

/// Appended to every discussion target.
pub(crate) const GENERAL_COMMUNITIES: &[&str] =
    &["BuyItForLife", "ProductReviews", "shutupandtakemymoney"];

// ---------------------------------------------------------------------------
// Marketplace
// ---------------------------------------------------------------------------

pub(crate) const MARKETPLACE_CATEGORIES_BY_CATEGORY: Table = &[
    ("technology", &["Electronics", "Computers & Accessories", "Cell Phones & Accessories"]),
    ("beauty", &["Beauty & Personal Care", "Luxury Beauty", "Premium Beauty"]),
    ("fitness", &["Sports & Outdoors", "Exercise & Fitness", "Health & Household"]),
    ("food", &["Grocery & Gourmet Food", "Kitchen & Dining"]),
    ("fashion", &["Clothing, Shoes & Jewelry", "Luggage & Travel Gear"]),
    ("home", &["Home & Kitchen", "Tools & Home Improvement", "Garden & Outdoor"]),
    ("gaming", &["Video Games", "PC Gaming", "Toys & Games"]),
    ("pets", &["Pet Supplies"]),
];

pub(crate) const MARKETPLACE_CATEGORIES_BY_SUBCATEGORY: Table = &[
    ("yoga", &["Yoga Equipment", "Yoga Mats"]),
    ("running", &["Running Shoes", "Running Accessories"]),
    ("skincare", &["Skin Care", "Facial Skin Care"]),
    ("makeup", &["Makeup", "Makeup Brushes & Tools"]),
    ("coffee", &["Coffee", "Coffee Machines"]),
    ("headphones", &["Headphones", "Earbud Headphones"]),
    ("keyboards", &["Computer Keyboards", "Gaming Keyboards"]),
    ("dogs", &["Dog Supplies", "Dog Food"]),
    ("cats", &["Cat Supplies", "Cat Food"]),
];

/// Consulted when fewer than three products remain after explicit URLs.
pub(crate) const PRODUCT_URLS_BY_SUBCATEGORY: Table = &[
    ("yoga", &[
        "https://www.amazon.com/s?k=yoga+mat",
        "https://www.amazon.com/s?k=yoga+blocks",
        "https://www.amazon.com/s?k=yoga+strap",
    ]),
    ("running", &[
        "https://www.amazon.com/s?k=running+shoes",
        "https://www.amazon.com/s?k=running+belt",
    ]),
    ("skincare", &[
        "https://www.amazon.com/s?k=face+moisturizer",
        "https://www.amazon.com/s?k=vitamin+c+serum",
    ]),
    ("coffee", &[
        "https://www.amazon.com/s?k=coffee+grinder",
        "https://www.amazon.com/s?k=pour+over+coffee+maker",
    ]),
    ("headphones", &[
        "https://www.amazon.com/s?k=noise+cancelling+headphones",
        "https://www.amazon.com/s?k=wireless+earbuds",
    ]),
    ("keyboards", &["https://www.amazon.com/s?k=mechanical+keyboard"]),
    ("dogs", &["https://www.amazon.com/s?k=dog+toys", "https://www.amazon.com/s?k=dog+bed"]),
    ("cats", &["https://www.amazon.com/s?k=cat+tree", "https://www.amazon.com/s?k=cat+litter"]),
];

/// Appended to every marketplace target.
pub(crate) const GENERAL_MARKETPLACE_CATEGORIES: &[&str] = &["Best Sellers", "New Releases"];

/// Search page used as the product fallback for a category.
pub(crate) const MARKETPLACE_SEARCH_URL: &str = "https://www.amazon.com/s?k=";

// ---------------------------------------------------------------------------
// Social
// ---------------------------------------------------------------------------

pub(crate) const HASHTAGS_BY_CATEGORY: Table = &[
    ("technology", &["#tech", "#gadgets", "#techreview", "#setup"]),
    ("beauty", &["#skincare", "#makeup", "#beautytips", "#skincareroutine"]),
    ("fitness", &["#fitness", "#workout", "#gym", "#fitnessmotivation"]),
    ("food", &["#foodie", "#recipe", "#foodtok", "#healthyfood"]),
    ("fashion", &["#fashion", "#ootd", "#style", "#outfitideas"]),
    ("home", &["#homedecor", "#interiordesign", "#homeorganization", "#cleantok"]),
    ("gaming", &["#gaming", "#gamer", "#gamingsetup", "#pcgaming"]),
    ("pets", &["#dogsofinstagram", "#catsofinstagram", "#petlover", "#pets"]),
];

pub(crate) const HASHTAGS_BY_SUBCATEGORY: Table = &[
    ("yoga", &["#yoga", "#yogapractice", "#yogainspiration"]),
    ("running", &["#running", "#runnersofinstagram", "#marathontraining"]),
    ("skincare", &["#skincaretips", "#glowingskin"]),
    ("coffee", &["#coffee", "#coffeelover", "#coffeetime"]),
    ("headphones", &["#headphones", "#audiophile"]),
    ("keyboards", &["#mechanicalkeyboard", "#keyboard"]),
    ("dogs", &["#dogs", "#puppy"]),
    ("cats", &["#cats", "#catlover"]),
];

/// The first five are appended on the fallback path.
pub(crate) const GLOBAL_TRENDING_HASHTAGS: &[&str] = &[
    "#trending",
    "#viral",
    "#fyp",
    "#explore",
    "#tiktokmademebuyit",
    "#instagood",
    "#reels",
];

pub(crate) const TRENDING_HASHTAG_COUNT: usize = 5;

/// Appended to every social target.
pub(crate) const GENERAL_HASHTAGS: &[&str] = &["#productreview", "#musthave"];

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_lowercase_keys(table: Table) {
        for (key, values) in table {
            assert_eq!(*key, key.to_lowercase());
            assert!(!values.is_empty(), "empty entry for {key}");
        }
    }

    #[test]
    fn table_keys_are_lowercase_and_non_empty() {
        for table in [
            COMMUNITIES_BY_CATEGORY,
            COMMUNITIES_BY_SUBCATEGORY,
            COMMUNITIES_BY_GENDER,
            MARKETPLACE_CATEGORIES_BY_CATEGORY,
            MARKETPLACE_CATEGORIES_BY_SUBCATEGORY,
            PRODUCT_URLS_BY_SUBCATEGORY,
            HASHTAGS_BY_CATEGORY,
            HASHTAGS_BY_SUBCATEGORY,
        ] {
            assert_lowercase_keys(table);
        }
    }

    #[test]
    fn every_category_kind_has_fallbacks() {
        for category in [
            "technology", "beauty", "fitness", "food", "fashion", "home", "gaming", "pets",
        ] {
            assert!(!entries(COMMUNITIES_BY_CATEGORY, category).is_empty());
            assert!(!entries(MARKETPLACE_CATEGORIES_BY_CATEGORY, category).is_empty());
            assert!(!entries(HASHTAGS_BY_CATEGORY, category).is_empty());
        }
    }

    #[test]
    fn entries_misses_are_empty() {
        assert!(entries(COMMUNITIES_BY_CATEGORY, "").is_empty());
        assert!(entries(COMMUNITIES_BY_CATEGORY, "aerospace").is_empty());
    }
}
