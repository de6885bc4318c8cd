pub mod a001_fire_district;
