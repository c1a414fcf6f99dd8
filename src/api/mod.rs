pub mod hiring_api;
