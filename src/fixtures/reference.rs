use crate::database::LcvRecord;
use crate::domain::{Coordinates, DemandPoint, SupplyStation};

fn station(name: &str, lat: f64, lon: f64, filling_points: u32) -> SupplyStation {
    SupplyStation {
        name: name.to_string(),
        coords: Coordinates::new(lat, lon),
        filling_points,
    }
}

fn daughter(name: &str, lat: f64, lon: f64, average_sales: f64) -> DemandPoint {
    DemandPoint {
        name: name.to_string(),
        coords: Coordinates::new(lat, lon),
        average_sales,
    }
}

/// Filling stations of the Hyderabad deployment.
pub fn filling_stations() -> Vec<SupplyStation> {
    vec![
        station("CGS", 17.59705278, 78.54384722, 5),
        station("TSRTC MEDCHAL", 17.63378611, 78.48694167, 3),
        station("ONUS HAFIZPET", 17.48957778, 78.35370556, 2),
        station("HI-TECH HAFIZPET", 17.48598333, 78.35795, 2),
    ]
}

/// Daughter stations of the Hyderabad deployment with their average sales.
pub fn daughter_stations() -> Vec<DemandPoint> {
    vec![
        daughter("M/s. Bhagyanagar Gas Limited - 3/Hakimpet", 17.54600556, 78.53618056, 3349.26),
        daughter("M/s. Bhagyanagar Gas Limited - 4/Cantonment", 17.44771111, 78.49821389, 0.0),
        daughter("M/s. Bhagyanagar Gas Limited - 5/COCO/Saroornagar", 17.35567222, 78.54513889, 6416.56),
        daughter("M/s. Lalitha Devi Petrol Pump/R.P Road", 17.43283333, 78.4929, 1364.8),
        daughter("M/s. Sapthagiri Filling Station/Meerpet", 17.31770556, 78.51848333, 1563.17),
        daughter("M/s. Chakra Filling Station/Nampally", 17.38844722, 78.4754, 1787.03),
        daughter("M/s. KVS Service Station/Bowenpally", 17.47365, 78.47380278, 1738.18),
        daughter("M/s. Auto Prime/Chadarghat", 17.37726111, 78.48684167, 1335.65),
        daughter("M/s. Sri Radha Raman Service Station/Narayanaguda", 17.39345, 78.48931389, 1345.44),
        daughter("M/s. Ramesh Fuel Point/Dhoolpet", 17.370125, 78.46109444, 1052.65),
        daughter("M/s. Habeeb Service Station/Langer House", 17.37808333, 78.42043333, 1006.39),
        daughter("M/s. Hy-tech Fuel Station/Kishanbagh", 17.35903889, 78.44270833, 1546.91),
        daughter("M/s. Rajashree Service Station/Bahadurpura", 17.34860278, 78.45203889, 746.5),
        daughter("M/s. Pendhota Brothers Filling Station/Katedan", 17.30740833, 78.431625, 937.97),
        daughter("M/s. Sri Balaji Kailash Filling station/Hasthinapuram", 17.32982778, 78.55284167, 624.21),
    ]
}

/// Fleet loaded into a fresh registry.
pub fn default_fleet() -> Vec<LcvRecord> {
    [
        4000.0, 4000.0, 4000.0, 4500.0, 4500.0, 4000.0, 4500.0, 4500.0, 4000.0, 5000.0, 5000.0,
        5000.0, 5000.0,
    ]
    .into_iter()
    .enumerate()
    .map(|(idx, capacity)| LcvRecord {
        id: idx as i64 + 1,
        capacity,
    })
    .collect()
}
