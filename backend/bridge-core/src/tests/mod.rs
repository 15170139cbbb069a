mod catalog;
mod proxy;
mod surface;
