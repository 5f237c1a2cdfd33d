use std::collections::BTreeMap;

use turborand::{TurboRand, rng::Rng};

use crate::{
  GenerateError,
  assets::{ReferenceData, Stand},
  encode_heading,
};

#[derive(Debug, Clone, PartialEq)]
pub struct AllocatedStand {
  pub id: String,
  pub lat: String,
  pub long: String,
  /// Encoded with [`encode_heading`].
  pub heading: u32,
}

/// The stands still free for one generation run. Allocated stands are removed
/// and never handed out twice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StandPool {
  stands: BTreeMap<String, Stand>,
}

impl StandPool {
  pub fn new(stands: BTreeMap<String, Stand>) -> Self {
    Self { stands }
  }

  /// Every stand at `icao` except the ones in `occupied`.
  pub fn for_airport(
    data: &ReferenceData,
    icao: &str,
    occupied: &[String],
  ) -> Self {
    let mut stands = data.stands(icao).cloned().unwrap_or_default();
    stands.retain(|id, _| !occupied.contains(id));

    Self::new(stands)
  }

  pub fn len(&self) -> usize {
    self.stands.len()
  }

  pub fn is_empty(&self) -> bool {
    self.stands.is_empty()
  }

  #[cfg(test)]
  pub fn contains(&self, id: &str) -> bool {
    self.stands.contains_key(id)
  }

  pub fn allocate(
    &mut self,
    rng: &mut Rng,
  ) -> Result<AllocatedStand, GenerateError> {
    let id = rng.sample_iter(self.stands.keys()).cloned();
    let Some((id, stand)) = id.and_then(|id| self.stands.remove_entry(&id))
    else {
      return Err(GenerateError::ResourceExhausted("stands".to_owned()));
    };

    Ok(AllocatedStand {
      id,
      lat: stand.lat,
      long: stand.long,
      heading: encode_heading(stand.heading),
    })
  }
}
