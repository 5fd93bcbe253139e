//! ASCII plotting of a projected response curve.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! The x axis is `log10(dose)`; the y axis is the response percentage, fixed
//! to `[0, 100]` so the 50% reference row is stable.
//!
//! Plot elements:
//! - observed points: `o`
//! - connecting line: `-`
//! - 50% reference: `.`
//! - estimated dose: `|`

use crate::domain::CurveProjection;
use crate::report::fmt_dose;

/// Render a projection (and its markers, if any).
pub fn render_ascii_plot(projection: &CurveProjection, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = log_dose_range(projection).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = (0.0, 100.0);

    let mut grid = vec![vec![' '; width]; height];

    let curve: Vec<(f64, f64)> = projection
        .points
        .iter()
        .map(|p| (p.dose.log10(), p.response_percent))
        .collect();

    draw_curve(&mut grid, &curve, x_min, x_max, y_min, y_max);

    if let Some(a) = &projection.annotation {
        let row = map_y(a.reference_percent, y_min, y_max, height);
        for cell in grid[row].iter_mut().filter(|c| **c == ' ') {
            *cell = '.';
        }
        let col = map_x(a.estimate_dose.log10(), x_min, x_max, width);
        for line in grid.iter_mut() {
            if line[col] == ' ' || line[col] == '.' {
                line[col] = '|';
            }
        }
    }

    for &(x, y) in &curve {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        grid[row][col] = 'o';
    }

    // Build final string. We include a small header with ranges.
    let mut out = String::new();
    out.push_str(&format!(
        "Plot: dose=[{}, {}] (log10) | y=[0, 100] {}\n",
        fmt_dose(10f64.powf(x_min)),
        fmt_dose(10f64.powf(x_max)),
        projection.mode.percent_label()
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    if let Some(a) = &projection.annotation {
        out.push_str(&format!(
            "| {} = {}   . {:.0}%\n",
            projection.mode.display_name(),
            fmt_dose(a.estimate_dose),
            a.reference_percent
        ));
    }

    out
}

fn log_dose_range(projection: &CurveProjection) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let estimate = projection.annotation.map(|a| a.estimate_dose);
    for d in projection.points.iter().map(|p| p.dose).chain(estimate) {
        if d > 0.0 {
            min_x = min_x.min(d.log10());
            max_x = max_x.max(d.log10());
        }
    }
    if !(min_x.is_finite() && max_x.is_finite()) {
        return None;
    }
    if max_x - min_x < 1e-9 {
        return Some((min_x - 0.5, max_x + 0.5));
    }
    Some((min_x, max_x))
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        if let Some((c0, r0)) = prev {
            draw_line(grid, c0, r0, col, row, '-');
        } else {
            grid[row][col] = '-';
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Mode;
    use crate::report::project_response_curve;

    #[test]
    fn plot_golden_snapshot_small() {
        let projection = project_response_curve(&[100.0, 10.0, 1.0], &[0, 4, 8], 8, Mode::Ld50, Some(10.0)).unwrap();

        let txt = render_ascii_plot(&projection, 11, 5);
        let expected = concat!(
            "Plot: dose=[1.00, 100.00] (log10) | y=[0, 100] % surviving\n",
            "     |   -o\n",
            "     | --  \n",
            "....-o-....\n",
            "  -- |     \n",
            "o-   |     \n",
            "| LD50 = 10.00   . 50%\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn plot_without_estimate_has_no_markers() {
        let projection = project_response_curve(&[100.0, 1.0], &[0, 8], 8, Mode::Ed50, None).unwrap();
        let txt = render_ascii_plot(&projection, 20, 6);
        assert!(txt.starts_with("Plot: dose=[1.00, 100.00] (log10) | y=[0, 100] % responding\n"));
        let grid: Vec<&str> = txt.lines().skip(1).collect();
        assert_eq!(grid.len(), 6);
        assert!(grid.iter().all(|l| !l.contains('|') && !l.contains('.')));
        assert_eq!(grid[0], "o-                  ");
        assert_eq!(grid[5], "                  -o");
    }
}
