//! The emotion color palette of the sine journal and the colors used to draw the clusters.

use crate::space::Dataset;
use crate::types::{ClusterIdx,PointCount,Value};

use std::fmt;

/// The number of clusters the palette is usually drawn with.
pub const DEMO_K: PointCount = 3;

/// The emotions of the journal and their RGB colors.
pub const EMOTION_PALETTE: [(&str, [Value; 3]); 7] = [
    ("Confused", [150.0, 150.0, 175.0]),
    ("Scared", [50.0, 0.0, 100.0]),
    ("Angry", [200.0, 50.0, 50.0]),
    ("Sad", [75.0, 0.0, 125.0]),
    ("Weak", [175.0, 175.0, 200.0]),
    ("Happy", [255.0, 220.0, 0.0]),
    ("Strong", [220.0, 80.0, 50.0]),
];

/// Returns the emotion palette as a 3-dimensional [Dataset] (in the order of [EMOTION_PALETTE]).
///
/// # Example
/// ```rust
/// use sine_k_means::palette::emotion_palette;
/// let palette = emotion_palette();
/// assert_eq!(palette.n(), 7);
/// assert_eq!(palette.get(5), &[255.0, 220.0, 0.0]);
/// ```
pub fn emotion_palette() -> Dataset {
    Dataset::by_valid_ndpoints(EMOTION_PALETTE.iter().map(|(_, rgb)| rgb.to_vec()).collect())
}

/// Returns the name of the emotion with exactly this color, if there is one.
pub fn emotion_of(color: &[Value]) -> Option<&'static str> {
    EMOTION_PALETTE.iter()
        .find(|(_, rgb)| rgb.as_slice() == color)
        .map(|(name, _)| *name)
}

/// Label of cluster i as shown in the legend ("Cluster 1" for i = 0).
pub fn cluster_label(i: ClusterIdx) -> String {
    format!("Cluster {}", i + 1)
}

/// An RGB color with channels in 0..=255.
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

fn to_channel(x: Value) -> u8 {
    x.round().clamp(0.0, 255.0) as u8
}

/// The color a cluster of RGB points is drawn with: the mean of its points, each channel rounded
/// to the nearest integer and clamped to 0..=255.
/// Returns None for an empty cluster or if the points are not 3-dimensional.
///
/// # Example
/// ```rust
/// use sine_k_means::palette::{representative_color,Rgb};
/// let cluster = vec![vec![200.0, 50.0, 50.0], vec![220.0, 80.0, 50.0], vec![255.0, 220.0, 0.0]];
/// assert_eq!(representative_color(&cluster), Some(Rgb(225, 117, 33)));
/// assert_eq!(representative_color(&cluster).unwrap().to_string(), "rgb(225, 117, 33)");
/// ```
pub fn representative_color(cluster: &[Vec<Value>]) -> Option<Rgb> {
    if cluster.is_empty() || cluster.iter().any(|p| p.len() != 3) {
        return None;
    }
    let mean = crate::utilities::mean(cluster.iter().map(|p| p.as_slice()), 3);
    Some(Rgb(to_channel(mean[0]), to_channel(mean[1]), to_channel(mean[2])))
}
