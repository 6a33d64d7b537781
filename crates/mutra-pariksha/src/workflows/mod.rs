pub mod pariksha;
