use std::ops::RangeBounds;

use nalgebra::Vector3;
use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::{thread_rng, Rng};

pub fn random_vec<T: SampleUniform, R: RangeBounds<T> + SampleRange<T> + Clone>(
    range: R,
) -> Vector3<T> {
    let mut rng = thread_rng();
    Vector3::new(
        rng.gen_range(range.clone()),
        rng.gen_range(range.clone()),
        rng.gen_range(range),
    )
}

pub fn random_color() -> Vector3<f32> {
    random_vec(0.0..1.0)
}

pub fn random_between(low: f32, high: f32) -> f32 {
    thread_rng().gen_range(low..high)
}

// 쉼표로 구분된 실수 목록. 예: "0.5,-1,2". NaN, inf는 거부
pub fn parse_floats(input: &str) -> Option<Vec<f32>> {
    input
        .split(',')
        .map(|part| part.trim().parse::<f32>().ok().filter(|value| value.is_finite()))
        .collect()
}

pub fn parse_vector(input: &str) -> Result<Vector3<f32>, String> {
    match parse_floats(input).as_deref() {
        Some(&[x, y, z]) => Ok(Vector3::new(x, y, z)),
        _ => Err(format!("expected `x,y,z`, got `{input}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_values_stay_in_range() {
        for _ in 0..100 {
            let color = random_color();
            assert!(color.iter().all(|c| (0.0..1.0).contains(c)));

            let value = random_between(0.2, 0.6);
            assert!((0.2..0.6).contains(&value));
        }
    }

    #[test]
    fn parses_vectors() {
        assert_eq!(parse_vector("1, -2.5,3"), Ok(Vector3::new(1.0, -2.5, 3.0)));
        assert!(parse_vector("1,2").is_err());
        assert!(parse_vector("a,b,c").is_err());
        assert_eq!(parse_floats("4"), Some(vec![4.0]));
        assert_eq!(parse_floats("1,NaN"), None);
        assert_eq!(parse_floats("inf,0"), None);
        assert!(parse_vector("0,-inf,0").is_err());
    }
}
