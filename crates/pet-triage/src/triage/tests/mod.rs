mod common;
mod payload;
mod routing;
mod service;
