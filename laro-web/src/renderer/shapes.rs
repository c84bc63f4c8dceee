//! Shape primitives - vertices for overlay markers

/// Vertex structure for rendering colored shapes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// Triangles per marker circle
pub const CIRCLE_SEGMENTS: u32 = 12;

/// Convert a pixel position (origin top-left) to clip space (-1 to 1, Y up)
pub fn pixel_to_clip(x: f32, y: f32, width: u32, height: u32) -> [f32; 2] {
    let w = width.max(1) as f32;
    let h = height.max(1) as f32;
    [x / w * 2.0 - 1.0, -(y / h * 2.0 - 1.0)]
}

/// Generate vertices for a filled circle (triangle fan)
pub fn create_circle_vertices(
    cx: f32,
    cy: f32,
    radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let angle1 = (i as f32 / segments as f32) * std::f32::consts::TAU;
        let angle2 = ((i + 1) as f32 / segments as f32) * std::f32::consts::TAU;

        vertices.push(Vertex { position: [cx, cy], color });
        vertices.push(Vertex {
            position: [cx + radius * angle1.cos(), cy + radius * angle1.sin()],
            color,
        });
        vertices.push(Vertex {
            position: [cx + radius * angle2.cos(), cy + radius * angle2.sin()],
            color,
        });
    }

    vertices
}

/// Marker circle tessellated in pixel space, then mapped to clip space so it
/// stays round on non-square frames
pub fn marker_vertices(
    cx: f32,
    cy: f32,
    radius: f32,
    color: [f32; 4],
    width: u32,
    height: u32,
) -> Vec<Vertex> {
    let mut vertices = create_circle_vertices(cx, cy, radius, color, CIRCLE_SEGMENTS);
    for v in vertices.iter_mut() {
        v.position = pixel_to_clip(v.position[0], v.position[1], width, height);
    }
    vertices
}
