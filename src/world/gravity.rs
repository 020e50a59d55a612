use crate::math::vec2::Vec2;

/// Supplies the gravitational acceleration for the next tick.
///
/// Read exactly once per tick, before integration. A constant `Vec2` is the
/// usual source; closures let a sensor or a script drive it instead.
pub trait GravitySource {
    fn gravity(&mut self) -> Vec2;
}

impl GravitySource for Vec2 {
    fn gravity(&mut self) -> Vec2 {
        *self
    }
}

impl<F> GravitySource for F
where
    F: FnMut() -> Vec2,
{
    fn gravity(&mut self) -> Vec2 {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_source() {
        let mut g = Vec2::new(0.0, -9.81);
        assert_eq!(g.gravity(), Vec2::new(0.0, -9.81));
        assert_eq!(g.gravity(), Vec2::new(0.0, -9.81));
    }

    #[test]
    fn test_closure_source_is_polled() {
        let mut tilt = 0.0;
        let mut sensor = move || {
            tilt += 1.0;
            Vec2::new(tilt, -10.0)
        };
        assert_eq!(sensor.gravity(), Vec2::new(1.0, -10.0));
        assert_eq!(sensor.gravity(), Vec2::new(2.0, -10.0));
    }
}
