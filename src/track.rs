/// Extends a ground track by continuing the direction of its last segment.
///
/// The direction vector is the difference of the last two points, and `steps`
/// further points are appended along it. Extrapolation is planar in (lat, lon)
/// space, not great-circle; the visualized tail is decorative, so the
/// approximation is intentional. Tracks with fewer than two points have no
/// direction to continue and are returned unchanged.
pub fn extend(points: &[(f64, f64)], steps: usize) -> Vec<(f64, f64)> {
    let mut extended = points.to_vec();
    let [.., p0, p1] = points else {
        return extended;
    };
    let (dlat, dlon) = (p1.0 - p0.0, p1.1 - p0.1);
    for i in 1..=steps {
        extended.push((p1.0 + dlat * i as f64, p1.1 + dlon * i as f64));
    }
    extended
}
