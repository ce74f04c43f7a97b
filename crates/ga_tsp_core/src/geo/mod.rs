pub mod city;
pub mod geometry;
