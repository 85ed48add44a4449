use wgpu::{Buffer, BufferUsages, Device, Queue};

use riemann_fan::config::Viewport;
use riemann_fan::simulation::{DrawModel, Point, Rgba};

/// Axis stroke color
const AXIS_COLOR: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

/// Vertices a buffer can hold before it has to grow
const INITIAL_VERTEX_CAPACITY: u64 = 256;

/// One vertex in plot coordinates (24 bytes)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    fn new(point: Point, color: Rgba) -> Self {
        Self {
            position: [point.x as f32, point.y as f32],
            color: color.to_array(),
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Plot-to-clip mapping passed to the shader (16 bytes)
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ViewParams {
    pub plot_size: [f32; 2],
    pub _padding: [f32; 2],
}

/// Triangle list covering every region of both diagrams, in draw order
pub fn fill_vertices(model: &DrawModel) -> Vec<Vertex> {
    model
        .diagrams()
        .into_iter()
        .flat_map(|d| d.regions.iter())
        .flat_map(|poly| {
            poly.triangles()
                .flat_map(move |tri| tri.map(|p| Vertex::new(p, poly.color)))
        })
        .collect()
}

/// Line list for every axis arrow
pub fn line_vertices(model: &DrawModel) -> Vec<Vertex> {
    model
        .diagrams()
        .into_iter()
        .flat_map(|d| [d.axes.x_axis, d.axes.y_axis])
        .flat_map(|arrow| arrow.segments())
        .flat_map(|(a, b)| [Vertex::new(a, AXIS_COLOR), Vertex::new(b, AXIS_COLOR)])
        .collect()
}

/// A vertex buffer that grows to fit what is written into it
struct GrowableBuffer {
    label: &'static str,
    buffer: Buffer,
    capacity: u64,
    len: u32,
}

impl GrowableBuffer {
    fn new(device: &Device, label: &'static str) -> Self {
        Self {
            label,
            buffer: Self::allocate(device, label, INITIAL_VERTEX_CAPACITY),
            capacity: INITIAL_VERTEX_CAPACITY,
            len: 0,
        }
    }

    fn allocate(device: &Device, label: &'static str, capacity: u64) -> Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: capacity * std::mem::size_of::<Vertex>() as u64,
            usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn write(&mut self, device: &Device, queue: &Queue, vertices: &[Vertex]) {
        let needed = vertices.len() as u64;
        if needed > self.capacity {
            self.capacity = needed.next_power_of_two();
            self.buffer = Self::allocate(device, self.label, self.capacity);
            log::debug!("Grew {} to {} vertices", self.label, self.capacity);
        }
        if !vertices.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(vertices));
        }
        self.len = vertices.len() as u32;
    }
}

/// Per-frame vertex data plus the view uniform
pub struct SceneBuffers {
    fills: GrowableBuffer,
    lines: GrowableBuffer,
    pub view_buffer: Buffer,
}

impl SceneBuffers {
    pub fn new(device: &Device) -> Self {
        let view_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("view-params-buffer"),
            size: std::mem::size_of::<ViewParams>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            fills: GrowableBuffer::new(device, "fill-vertex-buffer"),
            lines: GrowableBuffer::new(device, "line-vertex-buffer"),
            view_buffer,
        }
    }

    /// Upload one frame's geometry
    pub fn upload(
        &mut self,
        device: &Device,
        queue: &Queue,
        model: &DrawModel,
        viewport: &Viewport,
    ) {
        self.fills.write(device, queue, &fill_vertices(model));
        self.lines.write(device, queue, &line_vertices(model));

        let params = ViewParams {
            plot_size: [viewport.width as f32, viewport.height as f32],
            _padding: [0.0, 0.0],
        };
        queue.write_buffer(&self.view_buffer, 0, bytemuck::bytes_of(&params));
    }

    /// (buffer, vertex count) of the filled regions
    pub fn fills(&self) -> (&Buffer, u32) {
        (&self.fills.buffer, self.fills.len)
    }

    /// (buffer, vertex count) of the axis lines
    pub fn lines(&self) -> (&Buffer, u32) {
        (&self.lines.buffer, self.lines.len)
    }
}
