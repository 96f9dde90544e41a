//! Even placement of cluster directions on the unit sphere.

use std::collections::HashMap;
use std::f32::consts::PI;

use glam::Vec3;

/// Returns `count` unit vectors spread over the sphere by the golden-angle
/// (Fibonacci) recurrence.
///
/// Points run from the north pole (`z = 1`) to the south pole (`z = -1`)
/// in equal `z` steps, each rotated by the golden angle from the last.
/// A single direction is the north pole; zero directions is an empty list.
pub fn fibonacci_sphere(count: usize) -> Vec<Vec3> {
    if count <= 1 {
        return vec![Vec3::Z; count];
    }

    let golden_angle = PI * (3.0 - 5.0_f32.sqrt());
    let last = (count - 1) as f32;

    (0..count)
        .map(|i| {
            let z = 1.0 - 2.0 * i as f32 / last;
            // Clamp guards the poles against tiny negative values under the root.
            let radius = (1.0 - z * z).max(0.0).sqrt();
            let theta = golden_angle * i as f32;
            Vec3::new(theta.cos() * radius, theta.sin() * radius, z)
        })
        .collect()
}

/// Assigns one sphere direction to each name, in order.
pub fn direction_table<S: AsRef<str>>(names: &[S]) -> HashMap<String, Vec3> {
    names
        .iter()
        .map(|n| n.as_ref().to_owned())
        .zip(fibonacci_sphere(names.len()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_are_distinct_unit_vectors() {
        for k in 2..=40 {
            let dirs = fibonacci_sphere(k);
            assert_eq!(dirs.len(), k);

            for d in &dirs {
                assert!((d.length() - 1.0).abs() < 1e-5, "k={k}: |{d:?}| != 1");
            }
            for i in 0..k {
                for j in (i + 1)..k {
                    assert!(
                        dirs[i].distance(dirs[j]) > 1e-4,
                        "k={k}: directions {i} and {j} coincide"
                    );
                }
            }
        }
    }

    #[test]
    fn endpoints_are_the_poles() {
        let dirs = fibonacci_sphere(5);
        assert_eq!(dirs[0], Vec3::Z);
        assert!((dirs[4].z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_counts_do_not_divide_by_zero() {
        assert!(fibonacci_sphere(0).is_empty());
        assert_eq!(fibonacci_sphere(1), vec![Vec3::Z]);
    }

    #[test]
    fn table_is_deterministic() {
        let names = ["Cyan", "Red", "Yellow"];
        let a = direction_table(&names);
        let b = direction_table(&names);
        assert_eq!(a, b);
        assert_eq!(a["Cyan"], Vec3::Z);
    }
}
