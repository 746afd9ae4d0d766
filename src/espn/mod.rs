// ESPN fantasy API: wire types, numeric code tables, and the HTTP client.

pub mod client;
pub mod codes;
pub mod types;
