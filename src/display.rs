//! Diagnostic formatting of solution vectors.

/// Formats a solution vector for diagnostic output.
///
/// Values are right-aligned to a common width. With `columns > 0` a line
/// break is inserted every `columns` values, which renders matrix-shaped
/// solutions (magic squares, QAP) as a grid.
///
/// # Examples
///
/// ```
/// use adaptive_search::display::format_solution;
///
/// assert_eq!(format_solution(&[3, 1, 2], 0), "3 1 2");
/// assert_eq!(format_solution(&[1, 2, 30, 4], 2), " 1  2\n30  4");
/// ```
pub fn format_solution(sol: &[i32], columns: usize) -> String {
    let width = sol
        .iter()
        .map(|v| v.to_string().len())
        .max()
        .unwrap_or(1);

    let mut out = String::new();
    for (k, v) in sol.iter().enumerate() {
        if k > 0 {
            if columns > 0 && k % columns == 0 {
                out.push('\n');
            } else {
                out.push(' ');
            }
        }
        out.push_str(&format!("{v:>width$}"));
    }
    out
}
