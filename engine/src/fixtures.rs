use serde_json::{Map, Value, json};

use crate::assets::ReferenceData;

pub const OTHH_STANDS: usize = 12;

fn othh_stands() -> Value {
  let mut stands = Map::new();
  for i in 0..OTHH_STANDS {
    stands.insert(
      (101 + i).to_string(),
      json!({
        "lat": format!("25.26{i:02}"),
        "long": format!("51.61{i:02}"),
        "hdg": (i * 30).to_string(),
      }),
    );
  }

  Value::Object(stands)
}

/// A small but complete data set for Doha.
pub fn othh() -> ReferenceData {
  serde_json::from_value(json!({
    "vfr_callsigns": {
      "A7ABC": "C172,PA28",
      "A7DEF": "C172",
      "A7GHI": "PA28,SR22",
      "A7JKL": "DA40",
    },
    "ifr_callsigns": {
      "OTHH": {
        "QTR": "OMDB,OERK,OTHH,EGLL",
        "BAW": "EGLL",
        "UAE": "OMDB",
      },
      "callsigns": {
        "QTR": "OTHH",
        "BAW": "OTHH",
        "UAE": "OTHH",
      },
    },
    "aircraft_types": {
      "QTR": "A320,B77W",
      "BAW": "A320",
      "UAE": "B77W,A388",
    },
    "vfr_destinations": {
      "OTHH": ["OTBD", "OTHH"],
    },
    "routes": {
      "OTHH": {
        "OMDB": "DEPAR1 UL768 DOH,35000",
        "OERK": "ALSEN1 UP559,36000",
        "EGLL": "BUNDU1 M318,38000",
      },
    },
    "invalid_routes": {
      "OTHH": {
        "OMDB": ["DEPAR1 UL768,35500", "DCT DOH,FL350"],
        "EGLL": ["BUNDU1,37000"],
      },
    },
    "stands": {
      "OTHH": othh_stands(),
    },
    "arrival_routes": {
      "OTHH": ["CF24", "RW34L"],
    },
  }))
  .unwrap()
}
