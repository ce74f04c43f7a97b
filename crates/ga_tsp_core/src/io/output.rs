use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::{City, Result, Tour};

/// Writes `tour` one `x,y` city per line, starting from city 0 so equal
/// loops always print the same way. `None` writes to stdout.
pub fn write_tour(path: Option<&Path>, cities: &[City], tour: &Tour) -> Result<()> {
    match path {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            write_tour_to(&mut out, cities, tour)?;
            out.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            write_tour_to(&mut out, cities, tour)?;
            out.flush()?;
        }
    }
    Ok(())
}

pub fn write_tour_to<W: Write>(out: &mut W, cities: &[City], tour: &Tour) -> Result<()> {
    for city in tour.rotated_to(0).cities(cities) {
        writeln!(out, "{city}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use super::{write_tour, write_tour_to};
    use crate::{City, Tour};

    fn cities() -> Vec<City> {
        vec![
            City::new(0.0, 0.0),
            City::new(0.0, 10.0),
            City::new(10.0, 10.0),
            City::new(10.5, 0.25),
        ]
    }

    #[test]
    fn writes_one_city_per_line_starting_at_first_city() {
        let tour = Tour::from_order(vec![2, 3, 0, 1]);
        let mut buf = Vec::new();
        write_tour_to(&mut buf, &cities(), &tour).expect("write tour");

        let text = String::from_utf8(buf).expect("utf8 output");
        assert_eq!(text, "0.0,0.0\n0.0,10.0\n10.0,10.0\n10.5,0.25\n");
    }

    #[test]
    fn writes_tour_file() {
        let path = env::temp_dir().join(format!("ga-tsp-output-{}.txt", process::id()));
        let tour = Tour::from_order(vec![1, 0, 3, 2]);

        write_tour(Some(&path), &cities(), &tour).expect("write tour file");
        let text = fs::read_to_string(&path).expect("read tour file");
        fs::remove_file(&path).expect("remove tour file");

        assert_eq!(text.lines().count(), 4);
        assert_eq!(text.lines().next(), Some("0.0,0.0"));
        assert_eq!(text.lines().nth(1), Some("10.5,0.25"));
    }
}
