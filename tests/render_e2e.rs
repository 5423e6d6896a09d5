//! End-to-end render tests
//!
//! These tests need a working GPU adapter and run only with
//! `cargo test --features integration-tests`.

#![cfg(feature = "integration-tests")]

use quadview::scene::{SceneBuilder, SURFACE_ID, WORLD_ID};
use quadview_render::{
    Camera, ChannelKind, Channels, FrameTarget, GpuMesh, ScenePipeline, SceneUniforms, INVALID_ID,
};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

fn create_device() -> (wgpu::Device, wgpu::Queue) {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::default(),
        compatible_surface: None,
        force_fallback_adapter: false,
    }))
    .expect("no GPU adapter available");
    pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor::default(), None))
        .expect("device creation failed")
}

fn demo_uniforms() -> SceneUniforms {
    let camera = Camera::new(
        [0.0, 0.0, 0.0],
        [0.1, 0.0, 1.0],
        [0.0, 1.0, 0.0],
        WIDTH as f32 / HEIGHT as f32,
    );
    SceneUniforms {
        view_proj: camera.view_proj(),
        ambient_radiance: 1.0,
        object_id: SURFACE_ID,
        instance_id: WORLD_ID,
        _padding: 0,
    }
}

fn render_once(frame: &FrameTarget, device: &wgpu::Device, queue: &wgpu::Queue, ids: bool) {
    let scene = SceneBuilder::new().add_quad().build();
    let surface = scene.quad_surface();
    let mesh = GpuMesh::new(device, surface.mesh(), surface.material());

    let pipeline = ScenePipeline::new(device, wgpu::TextureFormat::Rgba8UnormSrgb, ids);
    pipeline.update_uniforms(queue, &demo_uniforms());

    let submission = frame.render(
        device,
        queue,
        &pipeline,
        &mesh,
        wgpu::Color {
            r: 0.3,
            g: 0.3,
            b: 0.3,
            a: 1.0,
        },
    );
    frame.wait(device, submission);
}

#[test]
fn one_frame_renders_and_maps_all_channels() {
    let (device, queue) = create_device();
    let frame = FrameTarget::new(
        &device,
        WIDTH,
        HEIGHT,
        Channels::all(),
        wgpu::TextureFormat::Rgba8UnormSrgb,
    );

    render_once(&frame, &device, &queue, true);

    // The quad covers the image center; ids there match the scene.
    let (x, y) = (WIDTH / 2, HEIGHT / 2);
    {
        let prim = frame.map(&device, ChannelKind::PrimitiveId).unwrap();
        let value = prim.pixel_u32(x, y).unwrap();
        assert!(value < 2, "primitive id at center was {}", value);
        // A corner misses the quad and keeps the clear value.
        assert_eq!(prim.pixel_u32(1, 1).unwrap(), INVALID_ID);
    }
    {
        let obj = frame.map(&device, ChannelKind::ObjectId).unwrap();
        assert_eq!(obj.pixel_u32(x, y).unwrap(), SURFACE_ID);
    }
    {
        let inst = frame.map(&device, ChannelKind::InstanceId).unwrap();
        assert_eq!(inst.pixel_u32(x, y).unwrap(), WORLD_ID);
    }

    // Color channel: opaque everywhere, and not black at the center.
    let color = frame.map(&device, ChannelKind::Color).unwrap();
    let center = color.pixel_u32(x, y).unwrap();
    assert_eq!(center >> 24, 0xFF, "alpha byte must be opaque");
    assert_ne!(center & 0x00FF_FFFF, 0);
}

#[test]
fn undeclared_channel_maps_to_none() {
    let (device, queue) = create_device();
    // Color-only frame: the id channels are never declared.
    let frame = FrameTarget::new(
        &device,
        WIDTH,
        HEIGHT,
        Channels::COLOR,
        wgpu::TextureFormat::Rgba8UnormSrgb,
    );

    render_once(&frame, &device, &queue, false);

    assert!(frame.map(&device, ChannelKind::Color).is_some());
    assert!(frame.map(&device, ChannelKind::PrimitiveId).is_none());
    assert!(frame.map(&device, ChannelKind::ObjectId).is_none());
    assert!(frame.map(&device, ChannelKind::InstanceId).is_none());
}

#[test]
fn resize_updates_frame_size() {
    let (device, queue) = create_device();
    let mut frame = FrameTarget::new(
        &device,
        WIDTH,
        HEIGHT,
        Channels::COLOR,
        wgpu::TextureFormat::Rgba8UnormSrgb,
    );
    assert_eq!(frame.size(), (WIDTH, HEIGHT));

    frame.resize(&device, 320, 200);
    assert_eq!(frame.size(), (320, 200));

    render_once(&frame, &device, &queue, false);
    let color = frame.map(&device, ChannelKind::Color).unwrap();
    assert_eq!(color.width(), 320);
    assert_eq!(color.height(), 200);
}
