//! Mock flights, car rentals, and hotel stays for a travel season.
//!
//! Prices are higher in peak months. All randomness comes from the
//! caller's rng so a fixed seed reproduces the same inventory.

use chrono::{Datelike, Duration, NaiveDate};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

/// (city, country, airport code)
pub const CITIES: [(&str, &str, &str); 12] = [
    ("New York", "USA", "JFK"),
    ("London", "UK", "LHR"),
    ("Paris", "France", "CDG"),
    ("Tokyo", "Japan", "NRT"),
    ("Sydney", "Australia", "SYD"),
    ("Rio de Janeiro", "Brazil", "GIG"),
    ("Cairo", "Egypt", "CAI"),
    ("Cape Town", "South Africa", "CPT"),
    ("Moscow", "Russia", "SVO"),
    ("Dubai", "UAE", "DXB"),
    ("Mumbai", "India", "BOM"),
    ("Toronto", "Canada", "YYZ"),
];

pub const AIRLINES: [&str; 5] = [
    "Delta Air Lines",
    "Emirates",
    "South African Airways",
    "British Airways",
    "Air Canada",
];

/// Daily base rate per car class
pub const CAR_CLASSES: [(&str, u32); 5] = [
    ("Economy", 30),
    ("Compact", 40),
    ("SUV", 70),
    ("Luxury", 120),
    ("Van", 90),
];

pub const HOTEL_SUFFIXES: [&str; 5] = ["Grand Hotel", "Inn", "Suites", "Plaza", "Palace"];

pub const PEAK_MONTHS: [u32; 3] = [7, 8, 12];
const PEAK_MULTIPLIER: f64 = 1.2;
const OFFERS_PER_PRODUCT: usize = 3;
const CHILD_CAR_SURCHARGE_PER_DAY: u32 = 10;

#[derive(Clone, Copy, Debug)]
pub struct Season {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Season {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    fn random_day<R: Rng>(&self, rng: &mut R) -> NaiveDate {
        let span = (self.end - self.start).num_days();
        self.start + Duration::days(rng.gen_range(0..=span))
    }
}

pub fn peak_multiplier(date: NaiveDate) -> f64 {
    if PEAK_MONTHS.contains(&date.month()) {
        PEAK_MULTIPLIER
    } else {
        1.0
    }
}

fn price(amount: f64) -> u32 {
    amount.round() as u32
}

#[derive(Clone, Debug, Serialize)]
pub struct FlightOffer {
    pub airline: String,
    pub flight_number: String,
    pub origin_city: String,
    pub origin_country: String,
    pub origin_airport: String,
    pub destination_city: String,
    pub destination_country: String,
    pub destination_airport: String,
    pub departure: NaiveDate,
    pub return_date: NaiveDate,
    pub adult_price: u32,
    pub child_price: u32,
    pub stops: u32,
}

impl FlightOffer {
    pub fn id(&self, n: usize) -> String {
        format!(
            "flight:{}:{}-{}:{}",
            self.flight_number, self.origin_airport, self.destination_airport, n
        )
    }

    pub fn to_passage(&self) -> String {
        let stops = match self.stops {
            0 => String::from("nonstop"),
            1 => String::from("1 stop"),
            n => format!("{} stops", n),
        };
        format!(
            "Flight {} operated by {} from {}, {} ({}) to {}, {} ({}), {}. Departs {} and returns {}. Adult fare ${}, child fare ${}.",
            self.flight_number,
            self.airline,
            self.origin_city,
            self.origin_country,
            self.origin_airport,
            self.destination_city,
            self.destination_country,
            self.destination_airport,
            stops,
            self.departure,
            self.return_date,
            self.adult_price,
            self.child_price,
        )
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct CarRental {
    pub city: String,
    pub country: String,
    pub car_class: String,
    pub pickup: NaiveDate,
    pub dropoff: NaiveDate,
    pub total_price: u32,
    pub child_price: u32,
}

impl CarRental {
    pub fn days(&self) -> i64 {
        (self.dropoff - self.pickup).num_days()
    }

    pub fn daily_price(&self) -> f64 {
        match self.days() {
            d if d > 0 => self.total_price as f64 / d as f64,
            _ => self.total_price as f64,
        }
    }

    pub fn id(&self, n: usize) -> String {
        format!(
            "car:{}:{}:{}",
            self.city.to_lowercase().replace(' ', "-"),
            self.car_class.to_lowercase(),
            n
        )
    }

    pub fn to_passage(&self) -> String {
        format!(
            "{} car rental at {} Airport in {}, {} from {} to {} ({} days). Total ${} (${:.2} per day), child seat surcharge ${}.",
            self.car_class,
            self.city,
            self.city,
            self.country,
            self.pickup,
            self.dropoff,
            self.days(),
            self.total_price,
            self.daily_price(),
            self.child_price,
        )
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct HotelStay {
    pub city: String,
    pub country: String,
    pub hotel_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub adult_nightly: u32,
    pub child_nightly: u32,
}

impl HotelStay {
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    pub fn id(&self, n: usize) -> String {
        format!(
            "hotel:{}:{}",
            self.hotel_name.to_lowercase().replace(' ', "-"),
            n
        )
    }

    pub fn to_passage(&self) -> String {
        format!(
            "{} in {}, {} has a standard room (up to 4 guests) from {} to {} ({} nights). Adults ${} per night, children ${} per night.",
            self.hotel_name,
            self.city,
            self.country,
            self.check_in,
            self.check_out,
            self.nights(),
            self.adult_nightly,
            self.child_nightly,
        )
    }
}

/// "Delta Air Lines" -> "DE" followed by three digits
fn flight_number<R: Rng>(airline: &str, rng: &mut R) -> String {
    let prefix: String = airline
        .split_whitespace()
        .next()
        .unwrap_or(airline)
        .chars()
        .take(2)
        .collect::<String>()
        .to_uppercase();
    format!("{}{}", prefix, rng.gen_range(100..=999))
}

/// One offer for every ordered pair of distinct cities
pub fn flights<R: Rng>(season: &Season, rng: &mut R) -> Vec<FlightOffer> {
    let mut offers = Vec::with_capacity(CITIES.len() * (CITIES.len() - 1));
    for (o_city, o_country, o_code) in CITIES.iter() {
        for (d_city, d_country, d_code) in CITIES.iter() {
            if o_city == d_city {
                continue;
            }
            let departure = season.random_day(rng);
            let return_date = departure + Duration::days(rng.gen_range(3..=14));
            let airline = AIRLINES.choose(rng).copied().unwrap_or(AIRLINES[0]);
            let flight_number = flight_number(airline, rng);
            let base = rng.gen_range(300..=1500) as f64;
            let adult_price = price(base * peak_multiplier(departure));
            let child_price = price(adult_price as f64 * 0.75);
            let stops = rng.gen_range(0..=2);
            offers.push(FlightOffer {
                airline: airline.to_string(),
                flight_number,
                origin_city: o_city.to_string(),
                origin_country: o_country.to_string(),
                origin_airport: o_code.to_string(),
                destination_city: d_city.to_string(),
                destination_country: d_country.to_string(),
                destination_airport: d_code.to_string(),
                departure,
                return_date,
                adult_price,
                child_price,
                stops,
            });
        }
    }
    offers
}

pub fn car_rentals<R: Rng>(season: &Season, rng: &mut R) -> Vec<CarRental> {
    let mut offers = Vec::new();
    for (city, country, _) in CITIES.iter() {
        for (car_class, rate) in CAR_CLASSES.iter() {
            for _ in 0..OFFERS_PER_PRODUCT {
                let pickup = season.random_day(rng);
                let days: u32 = rng.gen_range(1..=10);
                let dropoff = pickup + Duration::days(days as i64);
                offers.push(CarRental {
                    city: city.to_string(),
                    country: country.to_string(),
                    car_class: car_class.to_string(),
                    pickup,
                    dropoff,
                    total_price: price(*rate as f64 * peak_multiplier(pickup) * days as f64),
                    child_price: days * CHILD_CAR_SURCHARGE_PER_DAY,
                });
            }
        }
    }
    offers
}

pub fn hotel_stays<R: Rng>(season: &Season, rng: &mut R) -> Vec<HotelStay> {
    let mut offers = Vec::new();
    for (city, country, _) in CITIES.iter() {
        for suffix in HOTEL_SUFFIXES.iter() {
            let hotel_name = format!("{} {}", city, suffix);
            for _ in 0..OFFERS_PER_PRODUCT {
                let check_in = season.random_day(rng);
                let nights = rng.gen_range(1..=7);
                let base = rng.gen_range(80..=300) as f64;
                let adult_nightly = price(base * peak_multiplier(check_in));
                offers.push(HotelStay {
                    city: city.to_string(),
                    country: country.to_string(),
                    hotel_name: hotel_name.clone(),
                    check_in,
                    check_out: check_in + Duration::days(nights),
                    adult_nightly,
                    child_nightly: price(adult_nightly as f64 * 0.5),
                });
            }
        }
    }
    offers
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// Reference offers that always lead the inventory so known searches
/// have a stable answer
pub fn fixed_offers() -> (FlightOffer, CarRental, HotelStay) {
    let start = date(2025, 8, 1);
    let end = date(2025, 8, 8);
    let flight = FlightOffer {
        airline: String::from("Delta Air Lines"),
        flight_number: String::from("DL123"),
        origin_city: String::from("New York"),
        origin_country: String::from("USA"),
        origin_airport: String::from("JFK"),
        destination_city: String::from("London"),
        destination_country: String::from("UK"),
        destination_airport: String::from("LHR"),
        departure: start,
        return_date: end,
        adult_price: 720,
        child_price: 540,
        stops: 0,
    };
    let car = CarRental {
        city: String::from("London"),
        country: String::from("UK"),
        car_class: String::from("Economy"),
        pickup: start,
        dropoff: end,
        total_price: 252,
        child_price: 70,
    };
    let hotel = HotelStay {
        city: String::from("London"),
        country: String::from("UK"),
        hotel_name: String::from("London Grand Hotel"),
        check_in: start,
        check_out: end,
        adult_nightly: 180,
        child_nightly: 90,
    };
    (flight, car, hotel)
}

#[derive(Debug, Serialize)]
pub struct Inventory {
    pub flights: Vec<FlightOffer>,
    pub cars: Vec<CarRental>,
    pub hotels: Vec<HotelStay>,
}

impl Inventory {
    /// The fixed reference offers followed by random ones for `season`
    pub fn generate<R: Rng>(season: &Season, rng: &mut R) -> Self {
        let (flight, car, hotel) = fixed_offers();
        let mut inventory = Self {
            flights: vec![flight],
            cars: vec![car],
            hotels: vec![hotel],
        };
        inventory.flights.extend(flights(season, rng));
        inventory.cars.extend(car_rentals(season, rng));
        inventory.hotels.extend(hotel_stays(season, rng));
        inventory
    }

    /// Every offer as `(id, text)` ready for indexing
    pub fn passages(&self) -> Vec<(Option<String>, String)> {
        let flights = self
            .flights
            .iter()
            .enumerate()
            .map(|(i, f)| (Some(f.id(i)), f.to_passage()));
        let cars = self
            .cars
            .iter()
            .enumerate()
            .map(|(i, c)| (Some(c.id(i)), c.to_passage()));
        let hotels = self
            .hotels
            .iter()
            .enumerate()
            .map(|(i, h)| (Some(h.id(i)), h.to_passage()));
        flights.chain(cars).chain(hotels).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn season() -> Season {
        Season::new(
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
        )
    }

    #[test]
    fn test_inventory_sizes() {
        let mut rng = StdRng::seed_from_u64(7);
        let inventory = Inventory::generate(&season(), &mut rng);
        assert_eq!(inventory.flights.len(), 1 + 12 * 11);
        assert_eq!(inventory.cars.len(), 1 + 12 * 5 * 3);
        assert_eq!(inventory.hotels.len(), 1 + 12 * 5 * 3);
        assert_eq!(inventory.passages().len(), 133 + 181 + 181);
    }

    #[test]
    fn test_fixed_offers_lead_inventory() {
        let inventory = Inventory::generate(&season(), &mut StdRng::seed_from_u64(5));

        let flight = &inventory.flights[0];
        assert_eq!(flight.flight_number, "DL123");
        assert_eq!(
            (flight.origin_city.as_str(), flight.destination_city.as_str()),
            ("New York", "London")
        );
        assert_eq!((flight.adult_price, flight.child_price, flight.stops), (720, 540, 0));

        let car = &inventory.cars[0];
        assert_eq!((car.city.as_str(), car.car_class.as_str()), ("London", "Economy"));
        assert_eq!((car.days(), car.total_price, car.child_price), (7, 252, 70));

        let hotel = &inventory.hotels[0];
        assert_eq!(hotel.hotel_name, "London Grand Hotel");
        assert_eq!((hotel.adult_nightly, hotel.child_nightly), (180, 90));
        assert_eq!(hotel.check_in, NaiveDate::from_ymd_opt(2025, 8, 1).unwrap());
        assert_eq!(hotel.nights(), 7);

        let passages = inventory.passages();
        assert_eq!(passages[0].0.as_deref(), Some("flight:DL123:JFK-LHR:0"));
        assert!(passages[0].1.contains("Flight DL123 operated by Delta Air Lines"));
    }

    #[test]
    fn test_passage_ids_are_unique() {
        let inventory = Inventory::generate(&season(), &mut StdRng::seed_from_u64(11));
        let passages = inventory.passages();
        let ids: std::collections::HashSet<_> =
            passages.iter().map(|(id, _)| id.clone()).collect();
        assert_eq!(ids.len(), passages.len());
    }

    #[test]
    fn test_same_seed_same_inventory() {
        let a = Inventory::generate(&season(), &mut StdRng::seed_from_u64(42));
        let b = Inventory::generate(&season(), &mut StdRng::seed_from_u64(42));
        assert_eq!(a.passages(), b.passages());
    }

    #[test]
    fn test_flight_rules() {
        let season = season();
        let mut rng = StdRng::seed_from_u64(1);
        for f in flights(&season, &mut rng) {
            assert_ne!(f.origin_city, f.destination_city);
            assert!(f.departure >= season.start && f.departure <= season.end);
            let trip = (f.return_date - f.departure).num_days();
            assert!((3..=14).contains(&trip));
            assert!(f.stops <= 2);
            assert_eq!(f.child_price, price(f.adult_price as f64 * 0.75));
            assert_eq!(f.flight_number.len(), 5);
            let max = price(1500.0 * peak_multiplier(f.departure));
            assert!(f.adult_price >= 300 && f.adult_price <= max);
        }
    }

    #[test]
    fn test_car_rules() {
        let mut rng = StdRng::seed_from_u64(2);
        for c in car_rentals(&season(), &mut rng) {
            let days = c.days() as u32;
            assert!((1..=10).contains(&days));
            assert_eq!(c.child_price, days * 10);
            let rate = CAR_CLASSES
                .iter()
                .find(|(name, _)| *name == c.car_class)
                .map(|(_, r)| *r)
                .unwrap();
            assert_eq!(
                c.total_price,
                price(rate as f64 * peak_multiplier(c.pickup) * days as f64)
            );
        }
    }

    #[test]
    fn test_hotel_rules() {
        let mut rng = StdRng::seed_from_u64(3);
        for h in hotel_stays(&season(), &mut rng) {
            assert!((1..=7).contains(&h.nights()));
            assert!(h.hotel_name.starts_with(&h.city));
            assert_eq!(h.child_nightly, price(h.adult_nightly as f64 * 0.5));
        }
    }

    #[test]
    fn test_peak_months() {
        let july = NaiveDate::from_ymd_opt(2025, 7, 15).unwrap();
        let october = NaiveDate::from_ymd_opt(2025, 10, 15).unwrap();
        let december = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        assert_eq!(peak_multiplier(july), 1.2);
        assert_eq!(peak_multiplier(october), 1.0);
        assert_eq!(peak_multiplier(december), 1.2);
    }

    #[test]
    fn test_flight_passage_text() {
        let offer = FlightOffer {
            airline: String::from("Delta Air Lines"),
            flight_number: String::from("DE123"),
            origin_city: String::from("New York"),
            origin_country: String::from("USA"),
            origin_airport: String::from("JFK"),
            destination_city: String::from("London"),
            destination_country: String::from("UK"),
            destination_airport: String::from("LHR"),
            departure: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            return_date: NaiveDate::from_ymd_opt(2025, 8, 8).unwrap(),
            adult_price: 720,
            child_price: 540,
            stops: 0,
        };
        assert_eq!(offer.id(4), "flight:DE123:JFK-LHR:4");
        assert_eq!(
            offer.to_passage(),
            "Flight DE123 operated by Delta Air Lines from New York, USA (JFK) to London, UK (LHR), nonstop. Departs 2025-08-01 and returns 2025-08-08. Adult fare $720, child fare $540."
        );
    }
}
