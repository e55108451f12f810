use std::{fmt, fs, io::Read, path::Path};

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    Error, Point, Result, SolverOptions, constants::POINTS_SEED_OFFSET, utils::write_kv_block,
};

/// Points the solver visits.
#[derive(Clone, Debug, Default)]
pub struct SolverInput {
    pub(crate) points: Vec<Point>,
    source: String,
}

impl SolverInput {
    pub fn new(points: &[Point]) -> Self {
        Self {
            points: points.to_vec(),
            source: "memory".to_string(),
        }
    }

    /// Generates points or reads them from `--input`/stdin, as `options` asks.
    pub fn from_options(options: &SolverOptions, seed: u64) -> Result<Self> {
        if options.random_points > 0 {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(POINTS_SEED_OFFSET));
            return Ok(Self {
                points: random_points(options.random_points, options.point_range, &mut rng),
                source: format!("random(range={})", options.point_range),
            });
        }

        match options.input_path() {
            Some(path) => Ok(Self {
                points: read_points_from_file(path)?,
                source: path.display().to_string(),
            }),
            None => Ok(Self {
                points: read_points_from_stdin()?,
                source: "stdin".to_string(),
            }),
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub(crate) fn n(&self) -> usize {
        self.points.len()
    }

    pub(crate) fn get_point(&self, idx: usize) -> Point {
        self.points[idx]
    }
}

impl fmt::Display for SolverInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_kv_block(
            f,
            &[
                ("points", self.points.len().to_string()),
                ("source", self.source.clone()),
            ],
        )
    }
}

/// Integer-valued points drawn uniformly from `[0, range]` on both axes.
pub fn random_points<R: Rng + ?Sized>(count: usize, range: u32, rng: &mut R) -> Vec<Point> {
    (0..count)
        .map(|_| {
            Point::new(
                f64::from(rng.random_range(0..=range)),
                f64::from(rng.random_range(0..=range)),
            )
        })
        .collect()
}

fn read_points_from_file(path: &Path) -> Result<Vec<Point>> {
    let input = fs::read_to_string(path).map_err(|e| {
        Error::invalid_input(format!("failed to read input {}: {e}", path.display()))
    })?;
    parse_points(&input)
}

fn read_points_from_stdin() -> Result<Vec<Point>> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    parse_points(&input)
}

fn parse_points(input: &str) -> Result<Vec<Point>> {
    let mut points = Vec::new();
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

        let x: f64 = x_s.parse().map_err(|_| {
            Error::invalid_input(format!("Token {}: invalid x: {}", idx + 1, x_s))
        })?;
        let y: f64 = y_s.parse().map_err(|_| {
            Error::invalid_input(format!("Token {}: invalid y: {}", idx + 1, y_s))
        })?;

        let point = Point::new(x, y);
        if !point.is_valid() {
            return Err(Error::invalid_input(format!(
                "Token {}: coordinates must be finite: {tok}",
                idx + 1
            )));
        }
        points.push(point);
    }

    if points.is_empty() {
        return Err(Error::invalid_input("No points provided."));
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::{SolverInput, parse_points, random_points};
    use crate::SolverOptions;

    #[test]
    fn parse_points_parses_whitespace_separated_x_y_tokens() {
        let points = parse_points("1.0,2.0\n3.0,4.0 5,6").expect("parse points");
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].to_string(), "1.0,2.0");
        assert_eq!(points[2].to_string(), "5.0,6.0");
    }

    #[test]
    fn parse_points_rejects_empty_input() {
        let err = parse_points(" \n\t ").expect_err("empty input should fail");
        assert!(err.to_string().contains("No points provided."));
    }

    #[test]
    fn parse_points_rejects_missing_y() {
        let err = parse_points("1,2 3").expect_err("missing y should fail");
        assert!(err.to_string().contains("Token 2: missing y"));
    }

    #[test]
    fn parse_points_rejects_extra_comma_fields() {
        let err = parse_points("1,2,3").expect_err("extra fields should fail");
        assert!(err.to_string().contains("expected 'x,y'"));
    }

    #[test]
    fn parse_points_rejects_non_numeric_and_non_finite_coordinates() {
        let err = parse_points("a,2").expect_err("invalid x should fail");
        assert!(err.to_string().contains("invalid x"));

        let err = parse_points("1,inf").expect_err("infinite y should fail");
        assert!(err.to_string().contains("must be finite"));
    }

    #[test]
    fn random_points_stay_within_integer_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let points = random_points(200, 100, &mut rng);

        assert_eq!(points.len(), 200);
        for p in points {
            assert!((0.0..=100.0).contains(&p.x));
            assert!((0.0..=100.0).contains(&p.y));
            assert_eq!(p.x.fract(), 0.0);
            assert_eq!(p.y.fract(), 0.0);
        }
    }

    #[test]
    fn from_options_generates_reproducible_points() {
        let options = SolverOptions {
            random_points: 30,
            ..SolverOptions::default()
        };
        let a = SolverInput::from_options(&options, 42).expect("generate");
        let b = SolverInput::from_options(&options, 42).expect("generate");

        assert_eq!(a.points(), b.points());
        assert_eq!(a.n(), 30);
        assert!(a.to_string().contains("random(range=100)"));
    }

    #[test]
    fn from_options_reads_input_file() {
        let path = std::env::temp_dir().join(format!(
            "firefly-tsp-tests-input-{}.txt",
            std::process::id()
        ));
        std::fs::write(&path, "0,0 3,4\n6,8").expect("write input");

        let options = SolverOptions {
            input: path.display().to_string(),
            ..SolverOptions::default()
        };
        let input = SolverInput::from_options(&options, 0).expect("read input");
        std::fs::remove_file(&path).expect("cleanup input");

        assert_eq!(input.n(), 3);
        assert_eq!(input.get_point(1).to_string(), "3.0,4.0");
    }
}
