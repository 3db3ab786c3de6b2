// Built-in crop reference set, served when no database is configured and
// mirrored by the seed migration.

use crate::crops::models::CropRecord;

#[allow(clippy::too_many_arguments)]
fn crop(
    id: &str,
    category: &str,
    scientific_name: &str,
    soil_type: &str,
    ph: (f64, f64),
    temp: (f64, f64),
    rainfall: (f64, f64),
    season: &str,
    fertilizers: &str,
    irrigation: &str,
    pests: &[&str],
) -> CropRecord {
    CropRecord {
        id: id.to_string(),
        category: category.to_string(),
        scientific_name: scientific_name.to_string(),
        soil_type: soil_type.to_string(),
        ph_min: ph.0,
        ph_max: ph.1,
        temp_min: temp.0,
        temp_max: temp.1,
        rainfall_min: rainfall.0,
        rainfall_max: rainfall.1,
        season: season.to_string(),
        fertilizers: fertilizers.to_string(),
        irrigation: irrigation.to_string(),
        pests: pests.iter().map(|p| p.to_string()).collect(),
    }
}

pub fn reference_crops() -> Vec<CropRecord> {
    vec![
        crop(
            "rice",
            "Cereal",
            "Oryza sativa",
            "Clay loam",
            (5.5, 7.5),
            (20.0, 35.0),
            (800.0, 2000.0),
            "Kharif",
            "NPK 10:26:26 before sowing",
            "Maintain 3–5 cm water depth",
            &["stem borer", "leaf folder"],
        ),
        crop(
            "wheat",
            "Cereal",
            "Triticum aestivum",
            "Loamy",
            (6.0, 7.5),
            (10.0, 25.0),
            (300.0, 900.0),
            "Rabi",
            "Urea top-dressing at 30 & 60 DAS",
            "Critical stages: crown root initiation, heading",
            &["rust", "aphids"],
        ),
        crop(
            "maize",
            "Cereal",
            "Zea mays",
            "Loamy sand to clay loam",
            (5.8, 7.0),
            (21.0, 27.0),
            (500.0, 800.0),
            "Kharif",
            "Basal dose of NPK, with additional nitrogen at knee-high and tasseling stages.",
            "Irrigate at critical stages: tasseling, silking, and grain filling.",
            &["fall armyworm", "stem borer"],
        ),
        crop(
            "sugarcane",
            "Cash Crop",
            "Saccharum officinarum",
            "Deep loamy soils",
            (6.5, 7.5),
            (20.0, 32.0),
            (750.0, 1200.0),
            "Perennial",
            "Heavy application of nitrogen, phosphorus, and potassium.",
            "Frequent irrigation is required, especially during the formative phase.",
            &["early shoot borer", "mealybug"],
        ),
        crop(
            "cotton",
            "Fiber Crop",
            "Gossypium",
            "Well-drained deep loamy soils",
            (5.8, 8.0),
            (21.0, 35.0),
            (500.0, 1000.0),
            "Kharif",
            "Foliar spray of urea and DAP is beneficial during flowering and boll development.",
            "Irrigate at flowering and boll formation stages.",
            &["bollworm", "whitefly"],
        ),
        crop(
            "soybean",
            "Oilseed",
            "Glycine max",
            "Well-drained loam",
            (6.0, 7.5),
            (20.0, 30.0),
            (400.0, 600.0),
            "Kharif",
            "Use of rhizobium culture is recommended. Low nitrogen, higher phosphorus and potassium.",
            "Critical stages are pod initiation and seed filling.",
            &["girdle beetle", "leaf miner"],
        ),
        crop(
            "chickpea",
            "Pulse",
            "Cicer arietinum",
            "Light to heavy black soils",
            (6.0, 8.0),
            (10.0, 25.0),
            (300.0, 500.0),
            "Rabi",
            "Starter dose of nitrogen and phosphorus. Rhizobium inoculation is key.",
            "Generally grown as a rainfed crop; one irrigation can be given at pre-flowering stage if needed.",
            &["pod borer", "wilt"],
        ),
    ]
}
