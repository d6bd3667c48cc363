pub mod rapidapi;

pub use rapidapi::RapidApiProvider;
