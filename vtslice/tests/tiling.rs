use approx::assert_relative_eq;
use geojson::GeoJson;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use vtslice::{
	Tile, TileCoord, TileFeatureType, TileGeometry, TileIndex, TilerOptions,
	geometry::{
		GeoValue,
		math::{area_ring, project_x, project_y},
	},
};

fn build(data: Value, options: TilerOptions) -> TileIndex {
	TileIndex::new(&GeoJson::from_json_value(data).unwrap(), options).unwrap()
}

fn feature(geometry: Value, properties: Value) -> Value {
	json!({ "type": "Feature", "geometry": geometry, "properties": properties })
}

fn polygon_rings(tile: &Tile) -> Vec<Vec<[f64; 2]>> {
	tile.features
		.iter()
		.flat_map(|f| match &f.geometry {
			TileGeometry::Polygon(rings) => rings.clone(),
			_ => Vec::new(),
		})
		.collect()
}

/// Tile index of a position at zoom level `z`.
fn tile_of(lng: f64, lat: f64, z: u8) -> (i64, u32) {
	let size = f64::from(1u32 << z);
	(
		(project_x(lng) * size).floor() as i64,
		(project_y(lat) * size).floor() as u32,
	)
}

#[test]
fn polygon_across_the_antimeridian() {
	let square = json!({
		"type": "Polygon",
		"coordinates": [[[170, -10], [190, -10], [190, 10], [170, 10], [170, -10]]]
	});
	let mut index = build(feature(square, json!({})), TilerOptions::default());

	let extent = 4096.0;
	let buffer = 64.0;
	for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
		let tile = index.get_tile(1, x, y).unwrap();
		let rings = polygon_rings(tile);
		assert_eq!(rings.len(), 1, "tile 1/{x}/{y}");
		let ring = &rings[0];
		assert_eq!(ring.first(), ring.last());
		assert!(area_ring(ring) > 0.0);
		for [px, py] in ring {
			assert!(*px >= -buffer && *px <= extent + buffer);
			assert!(*py >= -buffer && *py <= extent + buffer);
		}
	}

	// the eastern part lands at the left edge of the western tiles
	let tile = index.get_tile(1, 0, 0).unwrap();
	let xs: Vec<f64> = polygon_rings(tile)[0].iter().map(|p| p[0]).collect();
	assert_eq!(xs.iter().copied().fold(f64::INFINITY, f64::min), -64.0);
}

#[test]
fn line_metrics_through_the_pyramid() {
	let line = json!({ "type": "LineString", "coordinates": [[-180, 0], [180, 0]] });
	let options = TilerOptions {
		line_metrics: true,
		..TilerOptions::default()
	};
	let mut index = build(feature(line, json!({ "name": "equator" })), options);

	let tile = index.get_tile(2, 1, 1).unwrap();
	assert_eq!(tile.features.len(), 1);
	let feature = &tile.features[0];
	assert_eq!(feature.geom_type(), TileFeatureType::Line);
	assert_eq!(
		feature.geometry,
		TileGeometry::LineString(vec![vec![[-64.0, 4096.0], [4160.0, 4096.0]]])
	);

	let tag = |key: &str| feature.tags.get(key).and_then(GeoValue::as_f64).unwrap();
	assert_relative_eq!(tag("mapbox_clip_start"), 0.246_093_75, epsilon = 1e-12);
	assert_relative_eq!(tag("mapbox_clip_end"), 0.503_906_25, epsilon = 1e-12);
	assert_eq!(feature.tags.get("name"), Some(&GeoValue::from("equator")));
}

#[test]
fn drill_down_to_max_zoom() {
	let (lng, lat) = (13.4, 52.52);
	let d = 0.005;
	let polygon = json!({
		"type": "Polygon",
		"coordinates": [[
			[lng - d, lat - d], [lng + d, lat - d], [lng + d, lat + d], [lng - d, lat + d], [lng - d, lat - d]
		]]
	});
	let data = json!({
		"type": "FeatureCollection",
		"features": [feature(polygon, json!({ "osm_id": 42 }))]
	});
	let options = TilerOptions {
		promote_id: Some("osm_id".to_string()),
		..TilerOptions::default()
	};
	let mut index = build(data, options);

	let (x, y) = tile_of(lng, lat, 14);
	let tile = index.get_tile(14, x, y).unwrap();
	assert_eq!(tile.features.len(), 1);
	assert_eq!(tile.features[0].id, Some(GeoValue::UInt(42)));
	for ring in polygon_rings(tile) {
		assert_eq!(ring.first(), ring.last());
	}
	assert!(tile.has_source());

	// nothing is cut below max_zoom
	assert!(index.get_tile(15, x * 2, y * 2).is_none());
	assert!(index.get_tile(14, x, y).is_some());
}

#[test]
fn eager_pass_and_cache() {
	let features: Vec<Value> = (0..50)
		.map(|i| {
			let lng = -170.0 + f64::from(i) * 7.0;
			feature(
				json!({ "type": "LineString", "coordinates": [[lng, -60], [lng + 3.0, 0], [lng, 60]] }),
				json!({ "index": i }),
			)
		})
		.collect();
	let options = TilerOptions {
		index_max_zoom: 3,
		index_max_points: 10,
		..TilerOptions::default()
	};
	let mut index = build(json!({ "type": "FeatureCollection", "features": features }), options);

	let eager = index.tile_coords().to_vec();
	assert_eq!(eager[0], TileCoord::ROOT);
	assert!(eager.iter().all(|c| c.level <= 3));
	assert!(eager.iter().any(|c| c.level == 3));

	// reading eagerly built tiles creates nothing new
	for coord in &eager {
		assert!(index.get_tile(coord.level, i64::from(coord.x), coord.y).is_some());
	}
	assert_eq!(index.tile_coords(), eager.as_slice());
}

#[test]
fn options_from_yaml() {
	let options = TilerOptions::from_yaml_str("max_zoom: 6\nextent: 512\nbuffer: 0\ngenerate_id: true\n").unwrap();
	let mut index = build(
		json!({
			"type": "FeatureCollection",
			"features": [
				feature(json!({ "type": "Point", "coordinates": [0, 0] }), json!({})),
				feature(json!({ "type": "Point", "coordinates": [45, 45] }), json!({}))
			]
		}),
		options,
	);

	let tile = index.get_tile(0, 0, 0).unwrap();
	let ids: Vec<_> = tile.features.iter().map(|f| f.id.clone()).collect();
	assert_eq!(ids, [Some(GeoValue::UInt(0)), Some(GeoValue::UInt(1))]);
	assert_eq!(tile.features[0].geometry, TileGeometry::Point(vec![[256.0, 256.0]]));
}

#[test]
fn invalid_input_is_fatal() {
	let error = TileIndex::from_json_str(r#"{"type":"Nonsense"}"#, TilerOptions::default());
	assert!(error.is_err());

	let options = TilerOptions {
		generate_id: true,
		promote_id: Some("id".to_string()),
		..TilerOptions::default()
	};
	let error = TileIndex::from_json_str(r#"{"type":"Point","coordinates":[0,0]}"#, options);
	assert_eq!(
		error.err().map(|e| e.to_string()),
		Some("promote_id and generate_id cannot be used together".to_string())
	);
}
