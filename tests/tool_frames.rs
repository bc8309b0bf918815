//! Frame-level tests: real tools rendered into a headless egui context,
//! exercising state adoption, idle-frame discipline and tool switching.

use std::sync::Arc;

use toolbench::tools::{self, Base64TextState, ImageDataUriState};
use toolbench::{StateProvider, ToastQueue, Tool, ToolCtx, ToolId, ToolbenchApp, panels};

struct Bench {
    ctx: egui::Context,
    provider: StateProvider,
    toasts: ToastQueue,
}

impl Bench {
    fn new() -> Self {
        Self {
            ctx: egui::Context::default(),
            provider: StateProvider::new(),
            toasts: ToastQueue::new(),
        }
    }

    fn frame_with(&mut self, tool: &mut dyn Tool, input: egui::RawInput) {
        let access = self.provider.access();
        let toasts = &mut self.toasts;
        let _ = self.ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let mut tool_ctx = ToolCtx::new(tool.id(), &access, toasts);
                tool.ui(ui, &mut tool_ctx);
            });
        });
    }

    fn frame(&mut self, tool: &mut dyn Tool) {
        self.frame_with(tool, egui::RawInput::default());
    }

    fn revision(&self) -> u64 {
        self.provider.with(|store| store.revision())
    }
}

#[test]
fn every_tool_adopts_state_on_its_first_frame() {
    let mut bench = Bench::new();
    for mut tool in tools::all_tools() {
        let id = tool.id();
        assert!(!bench.provider.with(|s| s.contains(id)));
        bench.frame(&mut tool);
        assert!(
            bench.provider.with(|s| s.contains(id)),
            "{id:?} never adopted state"
        );
    }
}

#[test]
fn an_idle_frame_writes_nothing_back() {
    let mut bench = Bench::new();
    for mut tool in tools::all_tools() {
        bench.frame(&mut tool);
        let after_adoption = bench.revision();
        bench.frame(&mut tool);
        assert_eq!(
            bench.revision(),
            after_adoption,
            "{:?} wrote state without user input",
            tool.id()
        );
    }
}

#[test]
fn edits_survive_switching_tools_and_back() {
    let mut bench = Bench::new();
    let mut base64 = tools::tool_for(ToolId::Base64Text);
    let mut json = tools::tool_for(ToolId::JsonFormatter);

    bench.frame(&mut base64);
    bench.provider.with(|store| {
        store.update(ToolId::Base64Text, |mut state: Base64TextState| {
            state.input = String::from("hello from a frame test");
            state.recompute();
            state
        });
    });

    bench.frame(&mut json);
    bench.frame(&mut base64);

    let state = bench
        .provider
        .access()
        .get_cloned::<Base64TextState>(ToolId::Base64Text)
        .unwrap();
    assert_eq!(state.input, "hello from a frame test");
    assert!(!state.output.is_empty());
}

#[test]
fn toasts_flow_from_tool_contexts_to_the_queue() {
    let provider = StateProvider::new();
    let access = provider.access();
    let mut toasts = ToastQueue::new();

    let mut tool_ctx = ToolCtx::new(ToolId::JsonFormatter, &access, &mut toasts);
    tool_ctx.success("copied");
    tool_ctx.error("failed");
    drop(tool_ctx);

    assert_eq!(toasts.len(), 2);
}

#[test]
fn a_dropped_image_reaches_the_image_tool() {
    let png = {
        let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 255]));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    };

    let mut bench = Bench::new();
    let mut tool = tools::tool_for(ToolId::ImageDataUri);

    let mut input = egui::RawInput::default();
    input.dropped_files.push(egui::DroppedFile {
        name: String::from("pixel.png"),
        mime: String::from("image/png"),
        bytes: Some(Arc::from(png)),
        ..Default::default()
    });
    bench.frame_with(&mut tool, input);

    let state = bench
        .provider
        .access()
        .get_cloned::<ImageDataUriState>(ToolId::ImageDataUri)
        .unwrap();
    let report = state.report.expect("dropped image was not adopted");
    assert_eq!(report.mime, "image/png");
    assert_eq!((report.width, report.height), (2, 2));
    assert!(report.data_uri.starts_with("data:image/png;base64,"));
    assert!(state.error.is_none());
    assert!(state.texture.is_some());
}

#[test]
fn a_non_image_drop_is_rejected_with_a_toast() {
    let mut bench = Bench::new();
    let mut tool = tools::tool_for(ToolId::ImageDataUri);

    let mut input = egui::RawInput::default();
    input.dropped_files.push(egui::DroppedFile {
        name: String::from("notes.txt"),
        mime: String::from("text/plain"),
        bytes: Some(Arc::from(b"hello".to_vec())),
        ..Default::default()
    });
    bench.frame_with(&mut tool, input);

    assert_eq!(bench.toasts.len(), 1);
    let state = bench
        .provider
        .access()
        .get_cloned::<ImageDataUriState>(ToolId::ImageDataUri)
        .unwrap();
    assert!(state.report.is_none());
    assert!(state.error.is_none());
}

#[test]
fn the_shell_renders_headless_frames_and_mounts_tools() {
    let ctx = egui::Context::default();
    let mut app = ToolbenchApp::default();

    let _ = ctx.run(egui::RawInput::default(), |ctx| {
        panels::nav_panel(&mut app, ctx);
        panels::workspace(&mut app, ctx);
    });
    assert!(app.states().with(|s| s.contains(ToolId::JsonFormatter)));

    app.set_active_tool(ToolId::CaseConverter);
    let _ = ctx.run(egui::RawInput::default(), |ctx| {
        panels::nav_panel(&mut app, ctx);
        panels::workspace(&mut app, ctx);
    });
    assert!(app.states().with(|s| s.contains(ToolId::CaseConverter)));
    assert!(app.states().with(|s| s.contains(ToolId::JsonFormatter)));
}
