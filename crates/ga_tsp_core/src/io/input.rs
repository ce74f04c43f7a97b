use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use ga_tsp_derive::KvDisplay;
use rand::Rng;

use crate::{City, Error, Result, SolverOptions};

/// Where the cities of a run came from.
#[derive(Clone, Debug, PartialEq)]
pub enum CitySource {
    Generated { width: f64, height: f64 },
    File(PathBuf),
    Provided,
}

impl fmt::Display for CitySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generated { width, height } => write!(f, "uniform [0, {width}] x [0, {height}]"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Provided => f.write_str("provided"),
        }
    }
}

/// The fixed city set of one run.
#[derive(Clone, Debug, KvDisplay)]
pub struct ProblemInput {
    pub(crate) source: CitySource,
    #[kv(fmt = "len")]
    pub(crate) cities: Vec<City>,
}

impl ProblemInput {
    pub fn new(cities: Vec<City>) -> Self {
        Self {
            source: CitySource::Provided,
            cities,
        }
    }

    /// Reads `--input` when set, otherwise draws `--cities` random cities.
    pub fn from_options<R: Rng + ?Sized>(options: &SolverOptions, rng: &mut R) -> Result<Self> {
        match options.input_path() {
            Some(path) => Self::from_file(path),
            None => Ok(Self::random(
                options.num_cities,
                options.width,
                options.height,
                rng,
            )),
        }
    }

    /// `n` cities drawn independently and uniformly from `[0, width] x [0, height]`.
    pub fn random<R: Rng + ?Sized>(n: usize, width: f64, height: f64, rng: &mut R) -> Self {
        let cities = (0..n)
            .map(|_| City::new(rng.random::<f64>() * width, rng.random::<f64>() * height))
            .collect();
        Self {
            source: CitySource::Generated { width, height },
            cities,
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            Error::invalid_input(format!(
                "failed to read cities from {}: {e}",
                path.display()
            ))
        })?;
        Ok(Self {
            source: CitySource::File(path.to_path_buf()),
            cities: parse_cities(&raw)?,
        })
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn source(&self) -> &CitySource {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

/// Whitespace-separated `x,y` tokens.
pub(crate) fn parse_cities(input: &str) -> Result<Vec<City>> {
    let mut cities = Vec::new();
    for (idx, tok) in input.split_whitespace().enumerate() {
        let mut it = tok.split(',');
        let x_s = it
            .next()
            .ok_or_else(|| Error::invalid_input(format!("Token {}: missing x", idx + 1)))?;
        let y_s = it
            .next()
            .ok_or_else(|| Error::invalid_input(format!("Token {}: missing y", idx + 1)))?;

        if it.next().is_some() {
            return Err(Error::invalid_input(format!(
                "Token {}: expected 'x,y' but got extra comma fields: {tok}",
                idx + 1
            )));
        }

        let x: f64 = x_s
            .parse()
            .map_err(|_| Error::invalid_input(format!("Token {}: invalid x: {x_s}", idx + 1)))?;
        let y: f64 = y_s
            .parse()
            .map_err(|_| Error::invalid_input(format!("Token {}: invalid y: {y_s}", idx + 1)))?;

        let city = City::new(x, y);
        if !city.is_valid() {
            return Err(Error::invalid_input(format!(
                "Token {}: coordinates must be finite: {tok}",
                idx + 1
            )));
        }
        cities.push(city);
    }

    if cities.is_empty() {
        return Err(Error::degenerate_input("no cities found in input"));
    }

    Ok(cities)
}
