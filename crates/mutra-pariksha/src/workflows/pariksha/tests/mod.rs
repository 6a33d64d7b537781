mod common;
mod navigation;
mod session;
