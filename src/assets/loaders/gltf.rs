//! glTF 2.0 → [`Model`]
//!
//! Loading runs in fixed steps, each depending only on the ones before it:
//!
//! 1. Parse the document (text glTF or binary GLB) and resolve every buffer.
//! 2. Create one arena node per asset node, link the hierarchy and validate it.
//! 3. Pick the scene roots, build the depth-first linear list and extract the
//!    meshes of every reachable node into the shared vertex/index buffers.
//! 4. Resolve skins against the built graph.
//! 5. Build animation samplers and channels.
//!
//! Any failure aborts the whole load; no partially built model is returned.

use std::fs;
use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::animation::{
    Animation, AnimationChannel, AnimationPlayer, AnimationSampler, TargetPath,
};
use crate::assets::accessor::AccessorView;
use crate::assets::primitive::{GeometryBuilder, PrimitiveAttributes};
use crate::errors::{ArmatureError, Result};
use crate::model::Model;
use crate::resources::mesh::Mesh;
use crate::scene::{Node, NodeIndex, SceneGraph, Skin, Transform};
use crate::settings::ModelSettings;

pub struct GltfLoader;

impl GltfLoader {
    /// Loads a `.gltf` or `.glb` file. External buffers resolve relative to
    /// the file's directory.
    pub fn load(path: &Path, settings: &ModelSettings) -> Result<Model> {
        let bytes = fs::read(path)?;
        let base_dir = path.parent().unwrap_or(Path::new("./"));
        Self::load_from_slice(&bytes, base_dir, settings)
    }

    /// Loads from an in-memory document. `base_dir` resolves external buffer
    /// files.
    pub fn load_from_slice(bytes: &[u8], base_dir: &Path, settings: &ModelSettings) -> Result<Model> {
        let gltf = gltf::Gltf::from_slice(bytes)?;
        let buffers = Self::load_buffers(&gltf, base_dir)?;

        let mut geometry = GeometryBuilder::new();
        let graph = Self::build_graph(&gltf, &buffers, settings, &mut geometry)?;
        let skins = Self::load_skins(&gltf, &buffers, &graph)?;
        let animations = Self::load_animations(&gltf, &buffers, &graph)?;

        let mut player = AnimationPlayer::new(animations);
        player.time_scale = settings.time_scale;
        if !player.animations().is_empty()
            && let Err(err) = player.set_active(settings.active_animation)
        {
            log::warn!("{err}; playback stays inert");
            player.clear_active();
        }

        log::info!(
            "glTF loaded: {} nodes ({} reachable), {} skins, {} animations, {} vertices, {} indices",
            graph.len(),
            graph.linear().len(),
            skins.len(),
            player.animations().len(),
            geometry.vertices.len(),
            geometry.indices.len()
        );

        Ok(Model::new(graph, skins, player, geometry))
    }

    // ========================================================================
    // Buffers
    // ========================================================================

    fn load_buffers(gltf: &gltf::Gltf, base_dir: &Path) -> Result<Vec<Vec<u8>>> {
        let mut buffer_data = Vec::with_capacity(gltf.buffers().len());
        for buffer in gltf.buffers() {
            let mut data = match buffer.source() {
                gltf::buffer::Source::Bin => gltf
                    .blob
                    .as_deref()
                    .map(<[u8]>::to_vec)
                    .ok_or(ArmatureError::MissingBinaryChunk)?,
                gltf::buffer::Source::Uri(uri) => Self::read_uri(uri, base_dir)?,
            };

            if data.len() < buffer.length() {
                return Err(ArmatureError::BufferOutOfRange {
                    context: format!(
                        "buffer declares {} bytes but holds {}",
                        buffer.length(),
                        data.len()
                    ),
                    index: buffer.index(),
                });
            }
            // GLB chunks are padded to 4 bytes.
            data.truncate(buffer.length());
            buffer_data.push(data);
        }
        Ok(buffer_data)
    }

    fn read_uri(uri: &str, base_dir: &Path) -> Result<Vec<u8>> {
        if let Some(rest) = uri.strip_prefix("data:") {
            let Some((header, payload)) = rest.split_once(',') else {
                return Err(ArmatureError::UnsupportedUri(uri.to_string()));
            };
            if !header.ends_with(";base64") {
                return Err(ArmatureError::UnsupportedUri(uri.to_string()));
            }
            return Ok(BASE64.decode(payload)?);
        }

        if uri.contains("://") {
            return Err(ArmatureError::UnsupportedUri(uri.to_string()));
        }

        let path = base_dir.join(uri);
        log::debug!("Reading external buffer {}", path.display());
        Ok(fs::read(path)?)
    }

    // ========================================================================
    // Scene graph
    // ========================================================================

    fn build_graph(
        gltf: &gltf::Gltf,
        buffers: &[Vec<u8>],
        settings: &ModelSettings,
        geometry: &mut GeometryBuilder,
    ) -> Result<SceneGraph> {
        let mut graph = SceneGraph::with_capacity(gltf.nodes().len());

        // Arena index == asset index.
        for node in gltf.nodes() {
            let mut entry = Node::new(node.index()).with_transform(Transform::from(node.transform()));
            if let Some(name) = node.name() {
                entry = entry.with_name(name);
            }
            entry.skin = node.skin().map(|skin| skin.index());
            graph.insert(entry);
        }

        for node in gltf.nodes() {
            for child in node.children() {
                graph.attach(child.index(), node.index())?;
            }
        }
        graph.validate_acyclic()?;

        for root in Self::scene_roots(gltf, settings, &graph)? {
            graph.add_root(root)?;
        }
        graph.rebuild_linear();

        let nodes: Vec<gltf::Node<'_>> = gltf.nodes().collect();
        let order = graph.linear().to_vec();
        for index in order {
            let Some(mesh) = nodes.get(index).and_then(gltf::Node::mesh) else {
                continue;
            };
            let extracted = Self::load_mesh(&mesh, buffers, geometry)?;
            if let Some(node) = graph.get_mut(index) {
                node.mesh = Some(extracted);
            }
        }

        Ok(graph)
    }

    fn scene_roots(gltf: &gltf::Gltf, settings: &ModelSettings, graph: &SceneGraph) -> Result<Vec<NodeIndex>> {
        let scene = match settings.scene {
            Some(index) => Some(gltf.scenes().nth(index).ok_or(ArmatureError::SceneIndexOutOfBounds {
                index,
                count: gltf.scenes().len(),
            })?),
            None => gltf.default_scene().or_else(|| gltf.scenes().next()),
        };

        if let Some(scene) = scene {
            return Ok(scene.nodes().map(|node| node.index()).collect());
        }

        log::debug!("Asset declares no scene; using every parentless node as a root");
        Ok(graph
            .nodes()
            .iter()
            .enumerate()
            .filter(|(_, node)| node.parent().is_none())
            .map(|(index, _)| index)
            .collect())
    }

    fn load_mesh(mesh: &gltf::Mesh<'_>, buffers: &[Vec<u8>], geometry: &mut GeometryBuilder) -> Result<Mesh> {
        use gltf::Semantic;

        let mut out = Mesh::new(mesh.name().map(str::to_string));

        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::warn!(
                    "Mesh {} primitive {} uses {:?}; only triangle lists are drawn",
                    mesh.index(),
                    primitive.index(),
                    primitive.mode()
                );
                continue;
            }

            let attributes = PrimitiveAttributes {
                position: attribute(&primitive, &Semantic::Positions, buffers)?,
                normal: attribute(&primitive, &Semantic::Normals, buffers)?,
                tex_coord0: attribute(&primitive, &Semantic::TexCoords(0), buffers)?,
                joints: [
                    attribute(&primitive, &Semantic::Joints(0), buffers)?,
                    attribute(&primitive, &Semantic::Joints(1), buffers)?,
                ],
                weights: [
                    attribute(&primitive, &Semantic::Weights(0), buffers)?,
                    attribute(&primitive, &Semantic::Weights(1), buffers)?,
                ],
                indices: match primitive.indices() {
                    Some(accessor) => AccessorView::from_gltf(&accessor, buffers)?,
                    None => None,
                },
            };

            if let Some(range) = geometry.append(&attributes)? {
                out.primitives.push(range);
            }
        }

        Ok(out)
    }

    // ========================================================================
    // Skins
    // ========================================================================

    fn load_skins(gltf: &gltf::Gltf, buffers: &[Vec<u8>], graph: &SceneGraph) -> Result<Vec<Skin>> {
        let mut skins = Vec::with_capacity(gltf.skins().len());

        for skin in gltf.skins() {
            let name = skin
                .name()
                .map_or_else(|| format!("Skin_{}", skin.index()), str::to_string);

            let joints: Vec<NodeIndex> = skin.joints().map(|joint| resolve_node(graph, joint.index())).collect();
            let skeleton_root = skin.skeleton().map(|root| resolve_node(graph, root.index()));

            let inverse_bind_matrices = match skin.inverse_bind_matrices() {
                Some(accessor) => AccessorView::from_gltf(&accessor, buffers)?
                    .map(|view| view.to_mat4())
                    .unwrap_or_default(),
                None => Vec::new(),
            };

            if inverse_bind_matrices.is_empty() {
                log::warn!("Skin '{name}' has no inverse bind matrices and will not be uploaded");
            } else if inverse_bind_matrices.len() != joints.len() {
                log::warn!(
                    "Skin '{name}' has {} joints but {} inverse bind matrices",
                    joints.len(),
                    inverse_bind_matrices.len()
                );
            }

            log::debug!("Skin '{name}': {} joints", joints.len());
            skins.push(Skin::new(&name, skeleton_root, joints, inverse_bind_matrices));
        }

        Ok(skins)
    }

    // ========================================================================
    // Animations
    // ========================================================================

    fn load_animations(gltf: &gltf::Gltf, buffers: &[Vec<u8>], graph: &SceneGraph) -> Result<Vec<Animation>> {
        let mut animations = Vec::with_capacity(gltf.animations().len());

        for animation in gltf.animations() {
            let mut samplers = Vec::new();
            for sampler in animation.samplers() {
                let inputs = AccessorView::from_gltf(&sampler.input(), buffers)?
                    .map(|view| view.to_scalars())
                    .unwrap_or_default();
                let outputs = AccessorView::from_gltf(&sampler.output(), buffers)?
                    .map(|view| view.to_vec4_padded())
                    .unwrap_or_default();
                samplers.push(AnimationSampler::new(inputs, outputs, sampler.interpolation().into()));
            }

            let mut channels = Vec::new();
            for channel in animation.channels() {
                let target = channel.target();
                let Some(path) = TargetPath::from_gltf(target.property()) else {
                    log::debug!(
                        "Animation {} channel on node {} targets morph weights; skipped",
                        animation.index(),
                        target.node().index()
                    );
                    continue;
                };
                channels.push(AnimationChannel {
                    target: path,
                    sampler: channel.sampler().index(),
                    node: resolve_node(graph, target.node().index()),
                });
            }

            let name = animation
                .name()
                .map_or_else(|| format!("Animation_{}", animation.index()), str::to_string);
            animations.push(Animation::new(name, samplers, channels));
        }

        Ok(animations)
    }
}

fn attribute<'a>(
    primitive: &gltf::Primitive<'_>,
    semantic: &gltf::Semantic,
    buffers: &'a [Vec<u8>],
) -> Result<Option<AccessorView<'a>>> {
    match primitive.get(semantic) {
        Some(accessor) => AccessorView::from_gltf(&accessor, buffers),
        None => Ok(None),
    }
}

/// Graph lookup for a node referenced by a skin or channel. Nodes outside the
/// built scene are still addressable by their arena index.
fn resolve_node(graph: &SceneGraph, asset_index: usize) -> NodeIndex {
    graph.find_node(asset_index).unwrap_or_else(|| {
        log::warn!("Node {asset_index} is not reachable from the scene roots");
        asset_index
    })
}
