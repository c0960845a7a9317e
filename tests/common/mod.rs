//! Shared glTF fixtures built in memory.
#![allow(dead_code)]

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use glam::{Mat4, Vec3};
use serde_json::{Value, json};

fn f32_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

const GLB_MAGIC: &[u8; 4] = b"glTF";
const CHUNK_JSON: u32 = 0x4E4F_534A;
const CHUNK_BIN: u32 = 0x004E_4942;

/// Binary payload of [`make_skinned_document`] and the `(offset, length)` of
/// each section, in accessor order. Sections are 4-byte aligned.
pub fn make_skinned_buffer() -> (Vec<u8>, Vec<(usize, usize)>) {
    let mut ibms = f32_bytes(&Mat4::from_translation(Vec3::new(0.0, -1.0, 0.0)).to_cols_array());
    ibms.extend(f32_bytes(&Mat4::from_translation(Vec3::new(0.0, -2.0, 0.0)).to_cols_array()));

    let sections: Vec<Vec<u8>> = vec![
        // 0: POSITION
        f32_bytes(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]),
        // 1: indices (u16)
        [0_u16, 1, 2].iter().flat_map(|v| v.to_le_bytes()).collect(),
        // 2: JOINTS_0 (u8 vec4)
        vec![0, 1, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0],
        // 3: WEIGHTS_0
        f32_bytes(&[0.5, 0.5, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]),
        // 4: inverse bind matrices, the inverse rest world of each joint
        ibms,
        // 5: animation times
        f32_bytes(&[0.0, 1.0]),
        // 6: animation translations
        f32_bytes(&[0.0, 1.0, 0.0, 0.0, 3.0, 0.0]),
    ];

    let mut buffer = Vec::new();
    let mut views = Vec::new();
    for section in sections {
        views.push((buffer.len(), section.len()));
        buffer.extend(section);
        while buffer.len() % 4 != 0 {
            buffer.push(0);
        }
    }
    (buffer, views)
}

/// A four-node skinned asset:
///
/// ```text
/// root (0)
/// ├── body (1)   mesh 0, skin 0
/// └── hips (2)   translation (0,1,0)
///     └── spine (3)   translation (0,1,0)
/// ```
///
/// Skin 0 binds joints `[hips, spine]`. Animation "bend" moves `spine` from
/// `(0,1,0)` at t=0 to `(0,3,0)` at t=1.
pub fn make_skinned_document() -> Value {
    let (buffer, views) = make_skinned_buffer();
    let uri = format!("data:application/octet-stream;base64,{}", BASE64.encode(&buffer));

    let buffer_views: Vec<Value> = views
        .iter()
        .map(|&(offset, length)| json!({ "buffer": 0, "byteOffset": offset, "byteLength": length }))
        .collect();

    json!({
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [{ "nodes": [0] }],
        "nodes": [
            { "name": "root", "children": [1, 2] },
            { "name": "body", "mesh": 0, "skin": 0 },
            { "name": "hips", "translation": [0.0, 1.0, 0.0], "children": [3] },
            { "name": "spine", "translation": [0.0, 1.0, 0.0] }
        ],
        "meshes": [{
            "name": "body",
            "primitives": [{
                "attributes": { "POSITION": 0, "JOINTS_0": 2, "WEIGHTS_0": 3 },
                "indices": 1
            }]
        }],
        "skins": [{
            "name": "rig",
            "joints": [2, 3],
            "skeleton": 2,
            "inverseBindMatrices": 4
        }],
        "animations": [{
            "name": "bend",
            "samplers": [{ "input": 5, "output": 6, "interpolation": "LINEAR" }],
            "channels": [{ "sampler": 0, "target": { "node": 3, "path": "translation" } }]
        }],
        "accessors": [
            { "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
              "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] },
            { "bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR" },
            { "bufferView": 2, "componentType": 5121, "count": 3, "type": "VEC4" },
            { "bufferView": 3, "componentType": 5126, "count": 3, "type": "VEC4" },
            { "bufferView": 4, "componentType": 5126, "count": 2, "type": "MAT4" },
            { "bufferView": 5, "componentType": 5126, "count": 2, "type": "SCALAR",
              "min": [0.0], "max": [1.0] },
            { "bufferView": 6, "componentType": 5126, "count": 2, "type": "VEC3" }
        ],
        "bufferViews": buffer_views,
        "buffers": [{ "byteLength": buffer.len(), "uri": uri }]
    })
}

pub fn make_skinned_gltf() -> Vec<u8> {
    serde_json::to_vec(&make_skinned_document()).unwrap()
}

/// [`make_skinned_document`] with its buffer pointed at `uri` instead of the
/// embedded data URI.
pub fn make_skinned_document_with_uri(uri: Option<&str>) -> Value {
    let mut document = make_skinned_document();
    let buffer = document["buffers"][0].as_object_mut().unwrap();
    match uri {
        Some(uri) => {
            buffer.insert("uri".to_string(), json!(uri));
        }
        None => {
            buffer.remove("uri");
        }
    }
    document
}

/// Packs `document` and an optional BIN payload into a GLB container.
///
/// Chunks are padded to 4 bytes: JSON with spaces, BIN with zeros.
pub fn make_glb(document: &Value, bin: Option<&[u8]>) -> Vec<u8> {
    let mut json_chunk = serde_json::to_vec(document).unwrap();
    while json_chunk.len() % 4 != 0 {
        json_chunk.push(b' ');
    }

    let mut chunks = Vec::new();
    push_chunk(&mut chunks, CHUNK_JSON, &json_chunk);
    if let Some(bin) = bin {
        let mut bin_chunk = bin.to_vec();
        while bin_chunk.len() % 4 != 0 {
            bin_chunk.push(0);
        }
        push_chunk(&mut chunks, CHUNK_BIN, &bin_chunk);
    }

    let mut glb = Vec::with_capacity(12 + chunks.len());
    glb.extend_from_slice(GLB_MAGIC);
    glb.extend_from_slice(&2_u32.to_le_bytes());
    glb.extend_from_slice(&((12 + chunks.len()) as u32).to_le_bytes());
    glb.extend(chunks);
    glb
}

fn push_chunk(out: &mut Vec<u8>, kind: u32, data: &[u8]) {
    out.extend_from_slice(&(data.len() as u32).to_le_bytes());
    out.extend_from_slice(&kind.to_le_bytes());
    out.extend_from_slice(data);
}

pub fn approx_mat4(a: Mat4, b: Mat4) -> bool {
    a.abs_diff_eq(b, 1e-5)
}
