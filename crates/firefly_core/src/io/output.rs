use std::{
    fs::File,
    io::{self, BufWriter, Write},
};

use crate::{Error, Result, SolverInput, SolverOptions, Tour};

/// Writes the route one point per line as `index x,y`, in tour order.
pub fn write_route(input: &SolverInput, tour: &Tour, options: &SolverOptions) -> Result<()> {
    match options.output_path() {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                Error::other(format!(
                    "failed to create route output file {}: {e}",
                    path.display()
                ))
            })?;
            write_route_to(&mut BufWriter::new(file), input, tour)
        }
        None => write_route_to(&mut io::stdout().lock(), input, tour),
    }
}

fn write_route_to<W: Write>(out: &mut W, input: &SolverInput, tour: &Tour) -> Result<()> {
    for &idx in tour.order() {
        writeln!(out, "{idx} {}", input.get_point(idx))?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::write_route_to;
    use crate::{Point, SolverInput, Tour};

    #[test]
    fn route_lines_follow_tour_order() {
        let input = SolverInput::new(&[
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ]);
        let mut out = Vec::new();
        write_route_to(&mut out, &input, &Tour::new(vec![2, 0, 1])).expect("write route");

        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text, "2 1.0,1.0\n0 0.0,0.0\n1 1.0,0.0\n");
    }
}
