use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A point of interest on the package map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinate {
    pub place: String,
    pub lat: f64,
    pub lng: f64,
}

/// One day of the package itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItineraryDay {
    pub day: u32,
    pub title: String,
    pub description: String,
}

/// Tour package offering.
///
/// `img` and `images` hold either locally-managed public paths
/// (`/uploads/packages/...`) or externally-hosted URLs; only the former are
/// reclaimed when replaced.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: Uuid,
    pub title: String,
    pub desc: String,
    pub start_point: String,
    pub destinations: Vec<String>,
    pub duration: String,
    pub price: f64,
    pub rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub coordinates: Vec<Coordinate>,
    #[serde(default)]
    pub itinerary: Vec<ItineraryDay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostel_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_plan: Option<String>,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cdn: Option<String>,
    pub featured: bool,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a new package.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewPackage {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "desc is required"))]
    pub desc: String,
    #[validate(length(min = 1, message = "startPoint is required"))]
    pub start_point: String,
    #[serde(default)]
    pub destinations: Vec<String>,
    #[validate(length(min = 1, message = "duration is required"))]
    pub duration: String,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 5.0, message = "rating must be between 0 and 5"))]
    pub rating: f64,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub coordinates: Vec<Coordinate>,
    #[serde(default)]
    pub itinerary: Vec<ItineraryDay>,
    #[serde(default)]
    pub hostel_type: Option<String>,
    #[serde(default)]
    pub transport_type: Option<String>,
    #[serde(default)]
    pub meal_plan: Option<String>,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub hotel_name: Option<String>,
    #[serde(default)]
    pub cdn: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Partial update for an existing package. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PackageUpdate {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "desc must not be empty"))]
    pub desc: Option<String>,
    pub start_point: Option<String>,
    pub destinations: Option<Vec<String>>,
    pub duration: Option<String>,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: Option<f64>,
    #[validate(range(min = 0.0, max = 5.0, message = "rating must be between 0 and 5"))]
    pub rating: Option<f64>,
    pub img: Option<String>,
    pub images: Option<Vec<String>>,
    pub coordinates: Option<Vec<Coordinate>>,
    pub itinerary: Option<Vec<ItineraryDay>>,
    pub hostel_type: Option<String>,
    pub transport_type: Option<String>,
    pub meal_plan: Option<String>,
    pub activities: Option<Vec<String>>,
    pub hotel_name: Option<String>,
    pub cdn: Option<String>,
    pub featured: Option<bool>,
    pub active: Option<bool>,
}

impl Package {
    /// Build a fresh record from creation fields.
    pub fn from_new(new: NewPackage) -> Self {
        let now = Utc::now();
        Package {
            id: Uuid::new_v4(),
            title: new.title,
            desc: new.desc,
            start_point: new.start_point,
            destinations: new.destinations,
            duration: new.duration,
            price: new.price,
            rating: new.rating,
            img: new.img,
            images: new.images,
            coordinates: new.coordinates,
            itinerary: new.itinerary,
            hostel_type: new.hostel_type,
            transport_type: new.transport_type,
            meal_plan: new.meal_plan,
            activities: new.activities,
            hotel_name: new.hotel_name,
            cdn: new.cdn,
            featured: new.featured,
            active: new.active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update in place, bumping `updated_at`.
    pub fn apply(&mut self, update: PackageUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(desc) = update.desc {
            self.desc = desc;
        }
        if let Some(start_point) = update.start_point {
            self.start_point = start_point;
        }
        if let Some(destinations) = update.destinations {
            self.destinations = destinations;
        }
        if let Some(duration) = update.duration {
            self.duration = duration;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(rating) = update.rating {
            self.rating = rating;
        }
        if let Some(img) = update.img {
            self.img = Some(img);
        }
        if let Some(images) = update.images {
            self.images = images;
        }
        if let Some(coordinates) = update.coordinates {
            self.coordinates = coordinates;
        }
        if let Some(itinerary) = update.itinerary {
            self.itinerary = itinerary;
        }
        if let Some(hostel_type) = update.hostel_type {
            self.hostel_type = Some(hostel_type);
        }
        if let Some(transport_type) = update.transport_type {
            self.transport_type = Some(transport_type);
        }
        if let Some(meal_plan) = update.meal_plan {
            self.meal_plan = Some(meal_plan);
        }
        if let Some(activities) = update.activities {
            self.activities = activities;
        }
        if let Some(hotel_name) = update.hotel_name {
            self.hotel_name = Some(hotel_name);
        }
        if let Some(cdn) = update.cdn {
            self.cdn = Some(cdn);
        }
        if let Some(featured) = update.featured {
            self.featured = featured;
        }
        if let Some(active) = update.active {
            self.active = active;
        }
        self.updated_at = Utc::now();
    }
}
