use catalog::DestinationId;

/// Invisible pick proxy around a destination marker.
///
/// Hit spheres are tested by `picking::pick_ray` regardless of visibility.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HitSphere {
    pub radius: f64,
    pub destination: DestinationId,
}

impl HitSphere {
    pub fn new(radius: f64, destination: DestinationId) -> Self {
        Self {
            radius,
            destination,
        }
    }
}
