use crate::types::{Dimension,Distance,Value};

/// Returns the index of the smallest value; for ties the first such index is returned.
/// Returns None for an empty input.
pub(crate) fn first_argmin<I: IntoIterator<Item = Distance>>(values: I) -> Option<usize> {
    let mut current: Option<(usize, Distance)> = None;
    for (i, d) in values.into_iter().enumerate() {
        match current {
            Some((_, best)) if d >= best => {}
            _ => current = Some((i, d)),
        }
    }
    current.map(|(i, _)| i)
}

/// Element-wise arithmetic mean of the given points of dimension dim.
/// The mean of no points is the origin.
pub(crate) fn mean<'a, I: IntoIterator<Item = &'a [Value]>>(points: I, dim: Dimension) -> Vec<Value> {
    let mut sum = vec![0.0; dim];
    let mut count: usize = 0;
    for p in points {
        for (s, x) in sum.iter_mut().zip(p.iter()) {
            *s += x;
        }
        count += 1;
    }
    if count == 0 {
        return sum; // the origin
    }
    sum.iter().map(|s| s / count as Value).collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmin_takes_first_minimum() {
        assert_eq!(first_argmin(vec![3.0, 1.0, 2.0, 1.0]), Some(1));
        assert_eq!(first_argmin(vec![0.0, 0.0]), Some(0));
        assert_eq!(first_argmin(vec![5.0]), Some(0));
        assert_eq!(first_argmin(Vec::new()), None);
    }

    #[test]
    fn mean_of_points() {
        let points: Vec<Vec<Value>> = vec![vec![0.0, 0.0, 0.0], vec![0.0, 0.0, 1.0]];
        assert_eq!(mean(points.iter().map(|p| p.as_slice()), 3), vec![0.0, 0.0, 0.5]);
        assert_eq!(mean(Vec::<&[Value]>::new(), 2), vec![0.0, 0.0]);
    }
}
