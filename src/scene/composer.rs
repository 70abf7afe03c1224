//! Garden scene composer
//!
//! [`GardenScene`] owns everything generated for one garden: the scene graph,
//! the resource registry, the path graph and the wandering farmer. The host
//! drives it with [`GardenScene::tick`] from its animation scheduler and
//! calls the query methods from UI handlers. Instances share no state.

use glam::{Quat, Vec3};
use tokio::sync::oneshot;

use crate::atmosphere::{SunState, SunSystem};
use crate::character::{AssetSlot, CharacterAsset, Farmer};
use crate::core::camera::Camera;
use crate::core::time::FrameClock;
use crate::core::Result;
use crate::garden::{Bed, GardenDescription, Plant};
use crate::nav::PathGraph;
use crate::terrain::ground_height;

use super::builders::{beds, fence, ground, netting, paths, plants, Part};
use super::config::SceneConfig;
use super::flatten::RenderItem;
use super::graph::SceneGraph;
use super::highlight::HighlightState;
use super::node::{Layer, LocalTransform, NodeContent, SceneNodeId};
use super::registry::{ElementKind, ResourceRegistry};

/// A garden rendered into a scene graph, plus its character and lighting.
pub struct GardenScene {
    config: SceneConfig,
    graph: SceneGraph,
    registry: ResourceRegistry,
    path_graph: PathGraph,
    farmer: Option<Farmer>,
    farmer_node: Option<SceneNodeId>,
    /// Character model, kept across rebuilds.
    character_asset: AssetSlot<CharacterAsset>,
    camera: Camera,
    sun: SunSystem,
    highlight: HighlightState,
    clock: FrameClock,
    viewport: (f32, f32),
    initialized: bool,
    needs_render: bool,
    disposed: bool,
    render_list: Vec<RenderItem>,
}

impl GardenScene {
    pub fn new(config: SceneConfig) -> Self {
        let path_graph = PathGraph::new(config.nav.position_resolution);
        let sun = SunSystem::new(config.sun.clone());
        Self {
            config,
            graph: SceneGraph::new(),
            registry: ResourceRegistry::new(),
            path_graph,
            farmer: None,
            farmer_node: None,
            character_asset: AssetSlot::Empty,
            camera: Camera::default(),
            sun,
            highlight: HighlightState::new(),
            clock: FrameClock::new(),
            viewport: (0.0, 0.0),
            initialized: false,
            needs_render: true,
            disposed: false,
            render_list: Vec::new(),
        }
    }

    /// Clear the scene and build everything in `garden` from scratch.
    pub fn render_garden(&mut self, garden: &GardenDescription) {
        if self.disposed {
            log::warn!("render_garden called on a disposed scene, ignoring");
            return;
        }
        self.clear_content();

        let ground = ground::build_ground(garden, &self.config);
        let root = self.graph.root();
        let id = self.insert_part(root, Layer::Ground, ground);
        self.registry.register_element(ElementKind::Ground, id);

        for bed in &garden.beds {
            self.add_bed(garden, bed);
        }

        if let Some(fence) = &garden.fence {
            let parts = fence::build_fence(garden, fence, &self.config.structures);
            self.add_group("fence", ElementKind::Fence, Layer::Structures, LocalTransform::identity(), parts);
        }

        if let Some(net) = garden.netting() {
            let parts = netting::build_netting(garden, net, &self.config.structures);
            self.add_group("netting", ElementKind::Netting, Layer::Structures, LocalTransform::identity(), parts);
        }

        for path in &garden.paths {
            if let Some(part) = paths::build_path(path, garden, &self.config) {
                let id = self.insert_part(root, Layer::Paths, part);
                self.registry.register_element(ElementKind::Path, id);
            }
        }

        for plant in &garden.scattered_plants {
            let world = garden.to_world(plant.position.x, plant.position.z);
            let base = Vec3::new(world.x, ground_height(world.x, world.z, &self.config.ground.ground), world.z);
            let node = self.add_plant(root, plant, base, None);
            self.registry.register_element(ElementKind::Plant, node);
        }

        self.path_graph = PathGraph::build(&garden.path_polylines(), &self.config.nav);
        let mut farmer = Farmer::new(self.config.character.clone());
        farmer.place(&self.path_graph);
        if let Some(asset) = self.character_asset.get() {
            farmer.set_asset(asset.clone());
        }
        self.farmer = Some(farmer);
        self.sync_character();

        self.camera = Camera::framing(garden.width, garden.length);
        self.camera.set_aspect(self.viewport.0, self.viewport.1);
        self.needs_render = true;

        log::info!(
            "Built garden {:.0}x{:.0} ft: {} beds, {} paths, {} scene nodes, {} path nodes",
            garden.width,
            garden.length,
            garden.beds.len(),
            garden.paths.len(),
            self.graph.node_count(),
            self.path_graph.node_count()
        );
    }

    /// Remove every generated element, keeping camera, sun and config.
    fn clear_content(&mut self) {
        for id in self.registry.drain() {
            self.graph.remove(id);
        }
        if let Some(mut farmer) = self.farmer.take() {
            farmer.dispose();
        }
        self.farmer_node = None;
        self.path_graph = PathGraph::new(self.config.nav.position_resolution);
        self.highlight.clear();
        self.render_list.clear();
    }

    fn insert_part(&mut self, parent: SceneNodeId, layer: Layer, part: Part) -> SceneNodeId {
        self.graph.add_mesh(parent, part.name, layer, part.mesh, part.material)
    }

    fn add_group(
        &mut self,
        name: &str,
        kind: ElementKind,
        layer: Layer,
        transform: LocalTransform,
        parts: Vec<Part>,
    ) -> (SceneNodeId, Vec<SceneNodeId>) {
        let root = self.graph.root();
        let group = self.graph.add_child(root, name, layer, NodeContent::Group);
        self.graph.set_transform(group, transform);
        self.registry.register_element(kind, group);
        let meshes = parts.into_iter().map(|part| self.insert_part(group, layer, part)).collect();
        (group, meshes)
    }

    fn add_bed(&mut self, garden: &GardenDescription, bed: &Bed) {
        let centre = garden.to_world(bed.position.x, bed.position.z);
        let origin = (centre.x, centre.z);
        let parts = beds::build_bed(bed, origin, &self.config);
        let (group, meshes) = self.add_group(
            &format!("bed:{}", bed.id),
            ElementKind::Bed,
            Layer::Beds,
            LocalTransform::from_position(centre),
            parts,
        );
        for mesh in meshes {
            self.registry.tag_bed_mesh(&bed.id, mesh);
        }

        for plant in &bed.plants {
            let (x, z) = (plant.position.x, plant.position.z);
            let y = beds::soil_surface(bed, origin, &self.config, x, z);
            self.add_plant(group, plant, Vec3::new(x, y, z), Some(&bed.id));
        }
        log::debug!("Bed '{}': {:?}, {} plants", bed.id, bed.frame_material, bed.plants.len());
    }

    /// Plant subtree under `parent`. Meshes are tagged when the plant sits in a bed.
    fn add_plant(&mut self, parent: SceneNodeId, plant: &Plant, base: Vec3, bed_id: Option<&str>) -> SceneNodeId {
        let node = self
            .graph
            .add_child(parent, format!("plant:{}", plant.id), Layer::Plants, NodeContent::Group);
        self.graph.set_transform(node, plants::plant_transform(plant, base));
        for part in plants::build_plant(plant) {
            let mesh = self.insert_part(node, Layer::Plants, part);
            if let Some(bed_id) = bed_id {
                self.registry.tag_bed_mesh(bed_id, mesh);
            }
        }
        node
    }

    /// Add the character node once the farmer has a model.
    fn sync_character(&mut self) {
        if self.farmer_node.is_some() {
            return;
        }
        let Some(name) = self.farmer.as_ref().and_then(|f| f.asset()).map(|a| a.name.clone()) else {
            return;
        };
        let root = self.graph.root();
        let node = self
            .graph
            .add_child(root, "farmer", Layer::Character, NodeContent::Model { asset: name, clip_phase: 0.0 });
        self.registry.register_element(ElementKind::Character, node);
        self.farmer_node = Some(node);
        self.update_character_transform();
    }

    fn update_character_transform(&mut self) {
        let (Some(farmer), Some(node)) = (self.farmer.as_ref(), self.farmer_node) else {
            return;
        };
        let p = farmer.position();
        let ground = &self.config.ground;
        let y = p.y + ground_height(p.x, p.z, &ground.ground) + ground.path_lift;
        let transform = LocalTransform {
            position: Vec3::new(p.x, y, p.z),
            rotation: Quat::from_rotation_y(farmer.motion().heading()),
            scale: farmer.asset().map_or(1.0, |a| a.scale),
        };
        let phase = farmer.clip_phase();
        self.graph.set_transform(node, transform);
        if let Some(NodeContent::Model { clip_phase, .. }) = self.graph.get_mut(node).map(|n| &mut n.content) {
            *clip_phase = phase;
        }
    }

    /// Release all generated content and stop the character.
    ///
    /// Safe to call repeatedly. Later ticks do nothing, and a model load that
    /// completes afterwards is dropped.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.clear_content();
        self.graph.clear();
        self.character_asset.clear();
        self.disposed = true;
        log::info!("Garden scene disposed after {} frames", self.clock.frames_drawn());
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Bed under a viewport pixel, nearest hit first.
    pub fn get_bed_at_point(&self, screen_x: f32, screen_y: f32) -> Option<String> {
        let (w, h) = self.viewport;
        let ray = self.camera.screen_ray(screen_x, screen_y, w, h)?;
        let (node, _) = self.graph.raycast(&ray, self.registry.all_bed_meshes())?;
        self.registry.bed_for_mesh(node).map(str::to_string)
    }

    /// Select a bed, or clear the selection with `None`.
    pub fn select_bed(&mut self, bed_id: Option<&str>) {
        if self.highlight.select(bed_id) {
            self.warn_unknown_bed(bed_id);
            self.needs_render = true;
        }
    }

    /// Mark a bed as hovered, or clear the hover with `None`.
    pub fn set_hovered_bed(&mut self, bed_id: Option<&str>) {
        if self.highlight.hover(bed_id) {
            self.warn_unknown_bed(bed_id);
            self.needs_render = true;
        }
    }

    fn warn_unknown_bed(&self, bed_id: Option<&str>) {
        if let Some(id) = bed_id.filter(|id| !self.registry.has_bed(id)) {
            log::debug!("Highlighting unknown bed '{}'", id);
        }
    }

    pub fn selected_bed(&self) -> Option<&str> {
        self.highlight.selected()
    }

    pub fn hovered_bed(&self) -> Option<&str> {
        self.highlight.hovered()
    }

    /// Move the sun to `hour` (0-24) on `day_of_year` (1-365).
    pub fn set_sun_time(&mut self, hour: f32, day_of_year: u32) {
        self.sun.set_time(hour, day_of_year);
        self.needs_render = true;
    }

    /// Ask for a redraw on the next tick.
    pub fn request_render(&mut self) {
        self.needs_render = true;
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Camera for host-side drag and zoom. Marks the scene for redraw.
    pub fn camera_mut(&mut self) -> &mut Camera {
        self.needs_render = true;
        &mut self.camera
    }

    /// Resize the render target.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = (width.max(0.0), height.max(0.0));
        self.camera.set_aspect(self.viewport.0, self.viewport.1);
        self.needs_render = true;
    }

    /// Start waiting on a character model load; the loader completes the sender.
    pub fn request_character(&mut self) -> oneshot::Sender<Result<CharacterAsset>> {
        let (tx, slot) = AssetSlot::pending();
        self.character_asset = slot;
        tx
    }

    /// Advance one frame by `dt` seconds. Returns whether a frame was drawn.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.disposed {
            return false;
        }
        let (w, h) = self.viewport;
        if w <= 0.0 || h <= 0.0 {
            log::trace!("Viewport not sized yet, deferring");
            return false;
        }
        if !self.initialized {
            self.initialized = true;
            self.camera.set_aspect(w, h);
            log::debug!("Viewport ready: {}x{}", w, h);
        }

        self.clock.tick(dt);
        let dt = self.clock.delta();

        if let Some(asset) = self.character_asset.poll("character model") {
            if let Some(farmer) = self.farmer.as_mut().filter(|f| f.asset().is_none()) {
                farmer.set_asset(asset.clone());
                self.needs_render = true;
            }
        }
        if let Some(farmer) = self.farmer.as_mut() {
            if farmer.tick(dt, &self.path_graph) {
                self.needs_render = true;
            }
        }
        self.sync_character();
        if self.farmer.as_ref().is_some_and(|f| f.motion().last_step() > 0.0) {
            self.update_character_transform();
        }

        if self.sun.update(dt) {
            self.needs_render = true;
        }

        self.animate_highlights();

        if self.needs_render || self.graph.is_dirty() {
            self.render_list = self.graph.flatten();
            self.needs_render = false;
            self.clock.record_draw();
            return true;
        }
        false
    }

    fn animate_highlights(&mut self) {
        let time = self.clock.elapsed();
        for (bed_id, glow) in self.highlight.updates(time, &self.config.highlight) {
            for &node in self.registry.bed_meshes(&bed_id) {
                self.graph.update_material(node, |m| {
                    m.emissive = glow.color;
                    m.emissive_intensity = glow.intensity;
                });
            }
        }
    }

    /// Items produced by the last draw.
    pub fn render_list(&self) -> &[RenderItem] {
        &self.render_list
    }

    pub fn path_graph(&self) -> &PathGraph {
        &self.path_graph
    }

    pub fn sun(&self) -> &SunState {
        self.sun.state()
    }

    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn farmer(&self) -> Option<&Farmer> {
        self.farmer.as_ref()
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }
}
