//! End-to-end tests: the real router on an ephemeral port, wiremock
//! standing in for OpenWeatherMap and GeoDB, and the frontend client
//! talking to the proxy over HTTP.

mod end_to_end;
mod support;
