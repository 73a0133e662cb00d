//! Client-side behavior of the weather UI: backend calls with
//! display-message mapping, debounced autocomplete, and the result card.

pub mod card;
pub mod client;
pub mod debounce;

pub use card::WeatherCard;
pub use client::{UiError, WeatherClient};
pub use debounce::SuggestionDebouncer;
