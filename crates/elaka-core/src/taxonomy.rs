//! # Taxonomies
//!
//! The authoritative static location hierarchy (division → district →
//! upazila) and the category seed list. Both the filter surface and
//! server-side seeding consume this single source, so client and server
//! can never drift apart on keys.
//!
//! The location tree is fixed configuration data: loaded once, never
//! mutated at runtime. Categories are seeded into the database from
//! [`SEED_CATEGORIES`] and may later be administratively edited.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;
use uuid::Uuid;

use crate::models::PostFilter;

/// One of Bangladesh's administrative divisions.
#[derive(Debug, Serialize)]
pub struct Division {
    /// Stable slug key used in filters and post rows.
    pub key: &'static str,
    /// Bengali display name.
    pub name: &'static str,
    pub districts: &'static [District],
}

/// A district under exactly one division.
#[derive(Debug, Serialize)]
pub struct District {
    pub key: &'static str,
    pub name: &'static str,
    /// Upazila display names; unique only within this district.
    pub upazilas: &'static [&'static str],
}

static DIVISIONS: &[Division] = &[
    Division {
        key: "dhaka",
        name: "ঢাকা",
        districts: &[
            District {
                key: "dhaka",
                name: "ঢাকা",
                upazilas: &[
                    "ধানমন্ডি", "গুলশান", "উত্তরা", "মিরপুর", "রমনা", "তেজগাঁও", "পল্লবী", "শাহআলী",
                ],
            },
            District {
                key: "gazipur",
                name: "গাজীপুর",
                upazilas: &["গাজীপুর সদর", "কালীগঞ্জ", "কাপাসিয়া", "শ্রীপুর", "টঙ্গী"],
            },
            District {
                key: "narayanganj",
                name: "নারায়ণগঞ্জ",
                upazilas: &["নারায়ণগঞ্জ সদর", "আড়াইহাজার", "বন্দর", "রূপগঞ্জ", "সোনারগাঁ"],
            },
        ],
    },
    Division {
        key: "chittagong",
        name: "চট্টগ্রাম",
        districts: &[
            District {
                key: "chittagong",
                name: "চট্টগ্রাম",
                upazilas: &[
                    "চট্টগ্রাম সদর", "হাটহাজারী", "রাউজান", "সীতাকুণ্ড", "মীরসরাই", "ফটিকছড়ি",
                ],
            },
            District {
                key: "coxsbazar",
                name: "কক্সবাজার",
                upazilas: &["কক্সবাজার সদর", "চকরিয়া", "টেকনাফ", "রামু", "উখিয়া"],
            },
        ],
    },
    Division {
        key: "sylhet",
        name: "সিলেট",
        districts: &[District {
            key: "sylhet",
            name: "সিলেট",
            upazilas: &["সিলেট সদর", "বিয়ানীবাজার", "গোলাপগঞ্জ", "জৈন্তাপুর", "কানাইঘাট"],
        }],
    },
    Division {
        key: "rajshahi",
        name: "রাজশাহী",
        districts: &[District {
            key: "rajshahi",
            name: "রাজশাহী",
            upazilas: &["রাজশাহী সদর", "গোদাগাড়ী", "দুর্গাপুর", "মোহনপুর", "পবা"],
        }],
    },
];

static DIVISION_INDEX: Lazy<HashMap<&'static str, &'static Division>> =
    Lazy::new(|| DIVISIONS.iter().map(|d| (d.key, d)).collect());

/// All divisions in declaration order.
pub fn divisions() -> &'static [Division] {
    DIVISIONS
}

/// Districts under a division; empty when the key is unknown.
pub fn districts(division: &str) -> &'static [District] {
    DIVISION_INDEX
        .get(division)
        .map(|d| d.districts)
        .unwrap_or(&[])
}

/// Upazilas under a division+district pair; empty when either key is unknown.
pub fn upazilas(division: &str, district: &str) -> &'static [&'static str] {
    districts(division)
        .iter()
        .find(|d| d.key == district)
        .map(|d| d.upazilas)
        .unwrap_or(&[])
}

/// A fully chosen division/district/upazila triple, the only shape that
/// may be forwarded into a [`PostFilter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedLocation {
    pub division: String,
    pub district: String,
    pub upazila: String,
}

impl SelectedLocation {
    pub fn apply_to(&self, filter: &mut PostFilter) {
        filter.division = Some(self.division.clone());
        filter.district = Some(self.district.clone());
        filter.upazila = Some(self.upazila.clone());
    }
}

/// Cascading location selection: choosing a division clears district and
/// upazila, choosing a district clears upazila. Partial selections never
/// convert into filter fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationSelection {
    division: Option<String>,
    district: Option<String>,
    upazila: Option<String>,
}

impl LocationSelection {
    /// Selects a division by key, resetting the levels below it.
    /// Returns false (state unchanged) when the key is unknown.
    pub fn select_division(&mut self, key: &str) -> bool {
        if !DIVISION_INDEX.contains_key(key) {
            return false;
        }
        self.division = Some(key.to_string());
        self.district = None;
        self.upazila = None;
        true
    }

    /// Selects a district under the current division, resetting the upazila.
    pub fn select_district(&mut self, key: &str) -> bool {
        let Some(division) = &self.division else {
            return false;
        };
        if !districts(division).iter().any(|d| d.key == key) {
            return false;
        }
        self.district = Some(key.to_string());
        self.upazila = None;
        true
    }

    /// Selects an upazila under the current division+district.
    pub fn select_upazila(&mut self, name: &str) -> bool {
        let (Some(division), Some(district)) = (&self.division, &self.district) else {
            return false;
        };
        if !upazilas(division, district).contains(&name) {
            return false;
        }
        self.upazila = Some(name.to_string());
        true
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Complete only when all three levels are chosen together.
    pub fn complete(&self) -> Option<SelectedLocation> {
        Some(SelectedLocation {
            division: self.division.clone()?,
            district: self.district.clone()?,
            upazila: self.upazila.clone()?,
        })
    }
}

/// Cascading category selection: choosing a category clears any
/// previously chosen subcategory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategorySelection {
    category_id: Option<Uuid>,
    subcategory_id: Option<Uuid>,
}

impl CategorySelection {
    pub fn select_category(&mut self, id: Uuid) {
        self.category_id = Some(id);
        self.subcategory_id = None;
    }

    /// A subcategory can only be chosen under a chosen category.
    pub fn select_subcategory(&mut self, id: Uuid) -> bool {
        if self.category_id.is_none() {
            return false;
        }
        self.subcategory_id = Some(id);
        true
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn apply_to(&self, filter: &mut PostFilter) {
        filter.category_id = self.category_id;
        filter.subcategory_id = self.subcategory_id;
    }
}

/// Seed row for a subcategory.
#[derive(Debug)]
pub struct SeedSubcategory {
    pub name: &'static str,
    pub name_en: &'static str,
}

/// Seed row for a category with its subcategories.
#[derive(Debug)]
pub struct SeedCategory {
    pub name: &'static str,
    pub name_en: &'static str,
    pub icon: &'static str,
    pub subcategories: &'static [SeedSubcategory],
}

macro_rules! sub {
    ($name:expr, $name_en:expr) => {
        SeedSubcategory {
            name: $name,
            name_en: $name_en,
        }
    };
}

/// The authoritative category list, seeded into the database once.
pub static SEED_CATEGORIES: &[SeedCategory] = &[
    SeedCategory {
        name: "জরুরি তথ্য",
        name_en: "Emergency Info",
        icon: "📢",
        subcategories: &[
            sub!("আজকের জরুরি খবর", "Today's Urgent News"),
            sub!("বিদ্যুৎ সংক্রান্ত নোটিশ", "Electricity Notices"),
            sub!("আবহাওয়ার সতর্কবার্তা", "Weather Alert"),
            sub!("রাস্তা/জ্যাম তথ্য", "Road/Traffic Info"),
            sub!("স্বাস্থ্য সতর্কতা", "Health Alert"),
            sub!("স্থানীয় সংবাদ", "Local News"),
            sub!("সরকারি বিজ্ঞপ্তি", "Government Notice"),
        ],
    },
    SeedCategory {
        name: "দোকান ও বাজার",
        name_en: "Shops & Markets",
        icon: "🛍️",
        subcategories: &[
            sub!("নিকটস্থ দোকান", "Nearby Shops"),
            sub!("ইলেকট্রনিক / হার্ডওয়্যার", "Electronics/Hardware"),
            sub!("জামা-কাপড়", "Clothing"),
            sub!("ফার্মেসি", "Pharmacy"),
            sub!("আজকের বাজার দর", "Today's Market Prices"),
            sub!("হাট দিন ও অবস্থান", "Market Days & Location"),
        ],
    },
    SeedCategory {
        name: "সার্ভিস প্রোভাইডার",
        name_en: "Service Providers",
        icon: "🧰",
        subcategories: &[
            sub!("ইলেকট্রিশিয়ান", "Electrician"),
            sub!("মিস্ত্রি", "Mechanic"),
            sub!("হাউজকিপিং", "Housekeeping"),
            sub!("রিকশা/ভ্যান", "Rickshaw/Van"),
            sub!("গাড়ি ভাড়া", "Car Rental"),
            sub!("রংমিস্ত্রি", "Painter"),
        ],
    },
    SeedCategory {
        name: "প্রয়োজনীয় সেবা",
        name_en: "Essential Services",
        icon: "👨‍⚕️",
        subcategories: &[
            sub!("নিকটস্থ হাসপাতাল", "Nearby Hospital"),
            sub!("অ্যাম্বুলেন্স", "Ambulance"),
            sub!("থানা", "Police Station"),
            sub!("ইউনিয়ন অফিস", "Union Office"),
            sub!("নারী সহায়তা হেল্পলাইন", "Women Support Helpline"),
            sub!("জরুরি হটলাইন", "Emergency Hotline"),
        ],
    },
    SeedCategory {
        name: "কমিউনিটি তথ্য",
        name_en: "Community Info",
        icon: "🗣️",
        subcategories: &[
            sub!("আমি তথ্য দিতে চাই", "I Want to Submit Info"),
            sub!("যাচাই চলছে", "Under Review"),
            sub!("এপ্রুভড তথ্য", "Approved Info"),
            sub!("বাতিল তথ্য", "Rejected Info"),
            sub!("স্থানীয় স্বেচ্ছাসেবক", "Local Volunteers"),
            sub!("টিউশন চাই / দিচ্ছি", "Tuition Needed/Available"),
            sub!("মহিলা প্রডাক্ট/গ্রুপ", "Women Products/Groups"),
        ],
    },
];
