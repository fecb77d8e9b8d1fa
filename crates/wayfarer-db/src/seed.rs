//! Seed documents for the one-off data-seeding tool.
//!
//! Each function builds one package document; [`upsert_seed_packages`] writes
//! them through the repository, updating in place when a package with the
//! same title already exists so the tool stays idempotent.

use crate::packages::PackageRepository;
use wayfarer_core::models::{Coordinate, ItineraryDay, NewPackage, PackageUpdate};
use wayfarer_core::AppError;

fn day(day: u32, title: &str, description: &str) -> ItineraryDay {
    ItineraryDay {
        day,
        title: title.to_string(),
        description: description.to_string(),
    }
}

fn coord(place: &str, lat: f64, lng: f64) -> Coordinate {
    Coordinate {
        place: place.to_string(),
        lat,
        lng,
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

pub fn taj_hotel_package() -> NewPackage {
    NewPackage {
        title: "Luxury Stay at Taj Hotel".to_string(),
        desc: "Experience world-class luxury and hospitality at the iconic Taj Hotel. Enjoy premium accommodations, fine dining, and exceptional service in the heart of the city. Our exclusive package includes deluxe room accommodation, complimentary breakfast, access to spa and wellness facilities, and personalized concierge services.".to_string(),
        start_point: "Karachi".to_string(),
        destinations: strings(&["Taj Hotel", "City Center", "Shopping District"]),
        duration: "3 days".to_string(),
        price: 25000.0,
        rating: 4.9,
        img: Some("https://images.unsplash.com/photo-1566073771259-6a8506099945?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80".to_string()),
        images: strings(&[
            "https://images.unsplash.com/photo-1566073771259-6a8506099945?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80",
            "https://images.unsplash.com/photo-1590490360182-c33d57733427?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80",
            "https://images.unsplash.com/photo-1578683010236-d716f9a3f461?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80",
            "https://images.unsplash.com/photo-1592229505726-ca121723b8ef?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80",
        ]),
        coordinates: vec![
            coord("Taj Hotel", 24.8607, 67.0011),
            coord("City Center", 24.86, 67.01),
        ],
        itinerary: vec![
            day(1, "Arrival and Check-in", "Welcome to Taj Hotel! Check-in to your luxurious room, enjoy a welcome drink, and take some time to relax. In the evening, explore the hotel facilities including the spa, fitness center, and rooftop pool. Dinner will be served at our award-winning restaurant."),
            day(2, "City Exploration", "After a sumptuous breakfast, embark on a guided city tour. Visit historical landmarks, explore local markets, and experience the vibrant culture. Return to the hotel for a relaxing spa session. Evening is free for you to enjoy the hotel's fine dining options or explore the nightlife."),
            day(3, "Leisure and Departure", "Enjoy a leisurely breakfast and make use of the hotel facilities. Check-out is at 12 PM, but you can store your luggage and continue to enjoy the hotel amenities. Optional: Late checkout available upon request."),
        ],
        hostel_type: Some("Luxury".to_string()),
        transport_type: Some("Luxury Bus".to_string()),
        meal_plan: Some("Full Board".to_string()),
        activities: strings(&[
            "Spa and Wellness",
            "City Tour",
            "Fine Dining",
            "Swimming Pool Access",
            "Fitness Center",
            "Concierge Services",
        ]),
        hotel_name: Some("Taj Hotel".to_string()),
        cdn: Some("https://sketchfab.com/3d-models/b-hotel-reception-baking-2b369ab3f98742629becd0ed33016c84".to_string()),
        featured: true,
        active: true,
    }
}

pub fn pc_hotel_package() -> NewPackage {
    NewPackage {
        title: "Rawalpindi to Islamabad City Tour".to_string(),
        desc: "Discover the twin cities of Rawalpindi and Islamabad with a luxurious stay at PC Hotel. Experience the perfect blend of historical charm and modern elegance. This package includes guided tours of historical landmarks, shopping at famous markets, and comfortable accommodation at PC Hotel with world-class amenities. Explore Faisal Mosque, Pakistan Monument, Lok Virsa Museum, and enjoy the vibrant food scene of the twin cities.".to_string(),
        start_point: "Rawalpindi".to_string(),
        destinations: strings(&[
            "Islamabad",
            "Faisal Mosque",
            "Pakistan Monument",
            "Lok Virsa Museum",
        ]),
        duration: "4 days".to_string(),
        price: 18000.0,
        rating: 4.7,
        img: Some("https://images.unsplash.com/photo-1529245856630-f4853233d2ea?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80".to_string()),
        images: strings(&[
            "https://images.unsplash.com/photo-1529245856630-f4853233d2ea?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80",
            "https://images.unsplash.com/photo-1551884170-09fb70a3a2ed?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80",
            "https://images.unsplash.com/photo-1571896349842-33c89424de2d?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80",
            "https://images.unsplash.com/photo-1566073771259-6a8506099945?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80",
        ]),
        coordinates: vec![
            coord("Rawalpindi Railway Station", 33.6167, 73.0678),
            coord("PC Hotel Islamabad", 33.6844, 73.0479),
            coord("Faisal Mosque", 33.7294, 73.0381),
            coord("Pakistan Monument", 33.6938, 73.0682),
        ],
        itinerary: vec![
            day(1, "Arrival and Check-in at PC Hotel", "Arrive in Rawalpindi and transfer to PC Hotel in Islamabad. Check-in to your comfortable room and freshen up. In the evening, enjoy a welcome dinner at the hotel's restaurant. Take a stroll around the hotel area to get familiar with the surroundings."),
            day(2, "Islamabad City Tour", "After breakfast, embark on a comprehensive city tour. Visit the iconic Faisal Mosque, one of the largest mosques in the world. Explore the Pakistan Monument and Museum, which showcases the history and culture of Pakistan. Visit Lok Virsa Museum to learn about the country's heritage. Enjoy lunch at a local restaurant and return to the hotel in the evening."),
            day(3, "Rawalpindi Heritage and Shopping", "Today, explore the historical city of Rawalpindi. Visit the famous Raja Bazaar and Saddar Bazaar for shopping. See the historical landmarks including the Rawalpindi Railway Station and old city areas. Experience the local culture and cuisine. Return to Islamabad for dinner at the hotel."),
            day(4, "Margalla Hills and Departure", "Early morning optional hike in Margalla Hills for nature lovers. After breakfast, visit Daman-e-Koh viewpoint for panoramic views of Islamabad. Enjoy last-minute shopping or relaxation at the hotel. Check-out and departure with beautiful memories of the twin cities."),
        ],
        hostel_type: Some("Premium".to_string()),
        transport_type: Some("Luxury Bus".to_string()),
        meal_plan: Some("Half Board".to_string()),
        activities: strings(&[
            "City Tour",
            "Historical Sites Visit",
            "Shopping",
            "Museum Tours",
            "Nature Walk",
            "Cultural Experience",
        ]),
        hotel_name: Some("PC Hotel".to_string()),
        cdn: Some("https://sketchfab.com/3d-models/modern-apartment-interior-400c9069181a4342a7142433dfa3466e".to_string()),
        featured: true,
        active: true,
    }
}

pub fn murree_top_package() -> NewPackage {
    NewPackage {
        title: "Sheikh Murre Mountain Retreat".to_string(),
        desc: "Escape to the beautiful hill station of Murree and experience a relaxing stay at Hotel Murre Top. Enjoy the cool mountain air, scenic views, and peaceful atmosphere. This package includes comfortable accommodation, guided nature walks, visits to popular viewpoints, and delicious local cuisine. Perfect for families and couples looking for a refreshing mountain getaway.".to_string(),
        start_point: "Islamabad".to_string(),
        destinations: strings(&["Murree", "Pindi Point", "Kashmir Point", "Mall Road"]),
        duration: "3 days".to_string(),
        price: 15000.0,
        rating: 4.6,
        img: Some("https://images.unsplash.com/photo-1586002990553-8850c4049470?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80".to_string()),
        images: strings(&[
            "https://images.unsplash.com/photo-1586002990553-8850c4049470?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80",
            "https://images.unsplash.com/photo-1566438480900-0609be27a4be?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80",
            "https://images.unsplash.com/photo-1589553416260-f586c8f1514f?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80",
            "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80",
        ]),
        coordinates: vec![
            coord("Islamabad", 33.6844, 73.0479),
            coord("Hotel Murre Top", 33.9078, 73.3903),
            coord("Pindi Point", 33.91, 73.39),
            coord("Kashmir Point", 33.905, 73.385),
        ],
        itinerary: vec![
            day(1, "Journey to Murree and Check-in", "Depart from Islamabad early morning and enjoy the scenic drive to Murree through winding mountain roads. Arrive at Hotel Murre Top and check-in to your cozy room with mountain views. After lunch, take a leisurely walk along Mall Road, the main shopping street of Murree. Enjoy the cool weather and explore local shops. Return to hotel for dinner and rest."),
            day(2, "Mountain Views and Nature", "After breakfast, visit Pindi Point for breathtaking views of the surrounding mountains and valleys. Continue to Kashmir Point, another famous viewpoint offering panoramic vistas. Enjoy a nature walk in the pine forests. Have lunch at a local restaurant. In the afternoon, visit Patriata (New Murree) for cable car ride (optional, at additional cost). Return to hotel for evening tea and relaxation."),
            day(3, "Last Day in the Mountains", "Enjoy a final breakfast with mountain views. Take a morning walk or visit any missed attractions. Do some last-minute shopping for souvenirs, local handicrafts, and traditional shawls. Check-out from the hotel and begin your journey back to Islamabad with beautiful memories of the mountains."),
        ],
        hostel_type: Some("Standard".to_string()),
        transport_type: Some("Luxury Bus".to_string()),
        meal_plan: Some("Half Board".to_string()),
        activities: strings(&[
            "Mountain Viewing",
            "Nature Walks",
            "Shopping",
            "Photography",
            "Cable Car Ride (Optional)",
            "Local Cuisine",
        ]),
        hotel_name: Some("Hotel Murre Top".to_string()),
        cdn: Some("https://sketchfab.com/3d-models/the-smoking-room-2247ed77976a40b6ae81271cd6b149c8".to_string()),
        featured: true,
        active: true,
    }
}

fn as_update(new: &NewPackage) -> PackageUpdate {
    PackageUpdate {
        title: Some(new.title.clone()),
        desc: Some(new.desc.clone()),
        start_point: Some(new.start_point.clone()),
        destinations: Some(new.destinations.clone()),
        duration: Some(new.duration.clone()),
        price: Some(new.price),
        rating: Some(new.rating),
        img: new.img.clone(),
        images: Some(new.images.clone()),
        coordinates: Some(new.coordinates.clone()),
        itinerary: Some(new.itinerary.clone()),
        hostel_type: new.hostel_type.clone(),
        transport_type: new.transport_type.clone(),
        meal_plan: new.meal_plan.clone(),
        activities: Some(new.activities.clone()),
        hotel_name: new.hotel_name.clone(),
        cdn: new.cdn.clone(),
        featured: Some(new.featured),
        active: Some(new.active),
    }
}

/// Create or update every seed package, keyed by title.
pub async fn upsert_seed_packages(repo: &PackageRepository) -> Result<(), AppError> {
    for new in [taj_hotel_package(), pc_hotel_package(), murree_top_package()] {
        match repo.find_by_title(&new.title).await? {
            Some(existing) => {
                tracing::info!(title = %new.title, "Package already exists, updating");
                repo.update(existing.id, as_update(&new)).await?;
            }
            None => {
                let created = repo.create(new).await?;
                tracing::info!(title = %created.title, id = %created.id, "Package created");
            }
        }
    }
    Ok(())
}
