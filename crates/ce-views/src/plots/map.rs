//! Choropleth map of counties

use std::sync::Arc;

use ce_core::color_scale::{MUTED_FILL, NO_DATA_FILL};
use ce_core::{Attribute, AttributeSelection, ColorScale, IdSet, SharedIdSet};
use ce_data::{Dataset, EnrichedFeature};
use egui::{Color32, Mesh, Pos2, Rect, Rounding, Sense, Shape, Stroke, Ui, Vec2};
use geo::{Contains, Coord, MapCoords, MultiPolygon, Point, Polygon, TriangulateEarcut};
use rstar::{RTree, RTreeObject, AABB};
use tracing::debug;

use super::legend::legend_ui;
use super::projection::{AlbersUsa, CanvasFit};
use crate::{SpaceView, SpaceViewId, ViewerContext};

/// Map view configuration
#[derive(Debug, Clone)]
pub struct MapConfig {
    pub outline_color: Color32,
    pub outline_width: f32,
    pub hover_width: f32,
    pub background: Color32,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            outline_color: Color32::from_rgb(0x33, 0x33, 0x33),
            outline_width: 0.5,
            hover_width: 2.0,
            background: Color32::from_rgb(0xf8, 0xf8, 0xf8),
            min_zoom: 1.0,
            max_zoom: 8.0,
        }
    }
}

/// Fill for one county: muted when filtered out, scale color when it has a value, no-data fill otherwise
pub fn county_fill(
    feature: &EnrichedFeature,
    attribute: Attribute,
    scale: &ColorScale,
    filter: Option<&IdSet>,
) -> Color32 {
    if let Some(filter) = filter {
        if !filter.contains(&feature.id) {
            return MUTED_FILL;
        }
    }
    match feature.value(attribute) {
        Some(value) => scale.color(value),
        None => NO_DATA_FILL,
    }
}

/// A polygon in canvas coordinates, triangulated once
struct ProjectedPolygon {
    vertices: Vec<[f64; 2]>,
    triangles: Vec<u32>,
    rings: Vec<Vec<[f64; 2]>>,
}

/// Projected geometry of one feature, same index as in the dataset
struct CountyShape {
    polygons: Vec<ProjectedPolygon>,
    outline: MultiPolygon<f64>,
}

/// R-tree entry over a county's projected bounding box
struct CountyEnvelope {
    index: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for CountyEnvelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

fn project_feature(projection: &AlbersUsa, geometry: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    let polygons = geometry
        .iter()
        .filter_map(|polygon| {
            let first = polygon.exterior().0.first()?;
            let region = AlbersUsa::region(first.x, first.y);
            let projected: Polygon<f64> = polygon.map_coords(|c| {
                let [x, y] = projection.project_in(region, c.x, c.y);
                Coord { x, y }
            });
            let finite = projected.exterior().coords().all(|c| c.x.is_finite() && c.y.is_finite());
            finite.then_some(projected)
        })
        .collect();
    MultiPolygon::new(polygons)
}

fn triangulate(polygon: &Polygon<f64>) -> ProjectedPolygon {
    let raw = polygon.earcut_triangles_raw();
    let vertices = raw.vertices.chunks_exact(2).map(|xy| [xy[0], xy[1]]).collect();
    let triangles = raw.triangle_indices.iter().map(|&i| i as u32).collect();
    let rings = std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(|ring| ring.coords().map(|c| [c.x, c.y]).collect())
        .collect();
    ProjectedPolygon {
        vertices,
        triangles,
        rings,
    }
}

fn bounding_box(polygon: &MultiPolygon<f64>) -> Option<AABB<[f64; 2]>> {
    let mut coords = polygon.iter().flat_map(|p| p.exterior().coords());
    let first = coords.next()?;
    let (mut lo, mut hi) = ([first.x, first.y], [first.x, first.y]);
    for c in coords {
        lo = [lo[0].min(c.x), lo[1].min(c.y)];
        hi = [hi[0].max(c.x), hi[1].max(c.y)];
    }
    Some(AABB::from_corners(lo, hi))
}

/// Choropleth of every boundary feature
pub struct MapView {
    id: SpaceViewId,
    title: String,
    pub config: MapConfig,
    dataset: Arc<Dataset>,

    // Coloring
    scale: ColorScale,
    filter: Option<SharedIdSet>,
    fills: Vec<Color32>,

    // Geometry
    shapes: Vec<CountyShape>,
    index: RTree<CountyEnvelope>,

    // Interaction
    zoom: f32,
    pan: Vec2,
    hovered: Option<usize>,
}

impl MapView {
    /// Project and triangulate every feature once, then color by `attribute`
    pub fn new(id: SpaceViewId, dataset: Arc<Dataset>, attribute: Attribute, config: MapConfig) -> Self {
        let projection = AlbersUsa::default();

        let shapes: Vec<CountyShape> = dataset
            .features()
            .iter()
            .map(|feature| {
                let outline = project_feature(&projection, &feature.geometry);
                CountyShape {
                    polygons: outline.iter().map(triangulate).collect(),
                    outline,
                }
            })
            .collect();

        let envelopes = shapes
            .iter()
            .enumerate()
            .filter_map(|(index, shape)| {
                bounding_box(&shape.outline).map(|envelope| CountyEnvelope { index, envelope })
            })
            .collect();

        debug!("Projected {} county shapes", shapes.len());

        let mut view = Self {
            id,
            title: String::new(),
            config,
            scale: ColorScale::build(attribute, dataset.records()),
            dataset,
            filter: None,
            fills: Vec::new(),
            shapes,
            index: RTree::bulk_load(envelopes),
            zoom: 1.0,
            pan: Vec2::ZERO,
            hovered: None,
        };
        view.refresh_fills();
        view
    }

    pub fn attribute(&self) -> Attribute {
        self.scale.attribute()
    }

    pub fn scale(&self) -> &ColorScale {
        &self.scale
    }

    pub fn filter(&self) -> Option<&SharedIdSet> {
        self.filter.as_ref()
    }

    /// Current fill per feature, in dataset order
    pub fn fills(&self) -> &[Color32] {
        &self.fills
    }

    /// Re-render under a new selection (`None` means unfiltered)
    pub fn set_filter(&mut self, filter: Option<SharedIdSet>) {
        self.filter = filter;
        self.refresh_fills();
    }

    /// Switch the colored attribute, rebuilding the scale. The filter is kept.
    pub fn set_attribute(&mut self, attribute: Attribute) {
        self.scale = ColorScale::build(attribute, self.dataset.records());
        self.refresh_fills();
    }

    fn refresh_fills(&mut self) {
        let attribute = self.scale.attribute();
        let filter = self.filter.as_deref();
        self.fills = self
            .dataset
            .features()
            .iter()
            .map(|feature| county_fill(feature, attribute, &self.scale, filter))
            .collect();
        self.title = format!("Map of {}", attribute.label());
    }

    /// Feature under a canvas-space point
    fn hit_test(&self, point: [f64; 2]) -> Option<usize> {
        let cursor = Point::new(point[0], point[1]);
        self.index
            .locate_in_envelope_intersecting(&AABB::from_point(point))
            .map(|entry| entry.index)
            .find(|&index| self.shapes[index].outline.contains(&cursor))
    }

    fn handle_zoom_pan(&mut self, ui: &Ui, rect: Rect, response: &egui::Response) {
        if response.double_clicked() {
            self.zoom = 1.0;
            self.pan = Vec2::ZERO;
            return;
        }

        if response.dragged() {
            self.pan += response.drag_delta();
        }

        if let Some(pointer) = response.hover_pos() {
            let scroll = ui.input(|i| i.scroll_delta.y);
            if scroll != 0.0 {
                let before = CanvasFit::new(rect, self.zoom, self.pan).to_canvas(pointer);
                self.zoom = (self.zoom * 1.1_f32.powf(scroll / 50.0)).clamp(self.config.min_zoom, self.config.max_zoom);
                // keep the point under the cursor fixed
                let after = CanvasFit::new(rect, self.zoom, self.pan).to_screen(before);
                self.pan += pointer - after;
            }
        }
    }

    fn build_mesh(&self, fit: &CanvasFit) -> Mesh {
        let mut mesh = Mesh::default();
        for (shape, &fill) in self.shapes.iter().zip(&self.fills) {
            for polygon in &shape.polygons {
                let base = mesh.vertices.len() as u32;
                for &vertex in &polygon.vertices {
                    mesh.colored_vertex(fit.to_screen(vertex), fill);
                }
                for triangle in polygon.triangles.chunks_exact(3) {
                    mesh.add_triangle(base + triangle[0], base + triangle[1], base + triangle[2]);
                }
            }
        }
        mesh
    }

    fn outline_shapes(&self, fit: &CanvasFit, index: usize, stroke: Stroke) -> impl Iterator<Item = Shape> + '_ {
        let fit = *fit;
        self.shapes[index].polygons.iter().flat_map(move |polygon| {
            polygon.rings.iter().map(move |ring| {
                let points: Vec<Pos2> = ring.iter().map(|&p| fit.to_screen(p)).collect();
                Shape::closed_line(points, stroke)
            })
        })
    }

    fn tooltip(&self, index: usize) -> Option<String> {
        let feature = self.dataset.features().get(index)?;
        let attribute = self.scale.attribute();
        let value = match feature.value(attribute) {
            Some(value) => value.to_string(),
            None => "N/A".to_string(),
        };
        Some(format!("{}\n{}: {}", feature.display_name(), attribute.label(), value))
    }
}

impl SpaceView for MapView {
    fn id(&self) -> SpaceViewId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn view_type(&self) -> &str {
        "MapView"
    }

    fn ui(&mut self, _ctx: &ViewerContext, ui: &mut Ui) {
        legend_ui(ui, &self.scale);
        ui.add_space(4.0);

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        self.handle_zoom_pan(ui, rect, &response);

        let fit = CanvasFit::new(rect, self.zoom, self.pan);
        self.hovered = response.hover_pos().and_then(|pos| self.hit_test(fit.to_canvas(pos)));

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, Rounding::ZERO, self.config.background);
        painter.add(Shape::mesh(self.build_mesh(&fit)));

        let outline = Stroke::new(self.config.outline_width, self.config.outline_color);
        painter.extend((0..self.shapes.len()).flat_map(|i| self.outline_shapes(&fit, i, outline)));

        if let Some(index) = self.hovered {
            let highlight = Stroke::new(self.config.hover_width, self.config.outline_color);
            painter.extend(self.outline_shapes(&fit, index, highlight));
            if let Some(text) = self.tooltip(index) {
                response.on_hover_text(text);
            }
        }
    }

    fn on_attributes_changed(&mut self, ctx: &ViewerContext, _previous: AttributeSelection) {
        if ctx.attributes.map != self.scale.attribute() {
            self.set_attribute(ctx.attributes.map);
        }
    }

    fn on_selection_change(&mut self, _ctx: &ViewerContext, filter: Option<&SharedIdSet>) {
        self.set_filter(filter.cloned());
    }
}
