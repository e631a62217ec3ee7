use futures::executor::block_on;

use scrollgrid::{
    ElementRect, GridLayout, GridStyles, ItemRect, PipelineOptions, WindowSize, provider_from_vec,
};
use scrollgrid_adapter::GridController;

fn main() {
    // Simulate a host event loop: geometry events come in, the controller
    // pumps planned requests into the fetcher, and resolved pages are
    // folded back in between frames.
    let dataset: Vec<String> = (0..5_000).map(|i| format!("row-{i}")).collect();

    let options = PipelineOptions::new(dataset.len(), 50)
        .with_window(WindowSize {
            width: 800.0,
            height: 600.0,
        })
        .with_page_provider(provider_from_vec(dataset))
        .with_debounce_ms(30);
    let mut controller = GridController::new(options);

    controller.on_item_rect(ItemRect {
        width: 400.0,
        height: 120.0,
    });
    controller.on_resize(
        GridLayout {
            rect: ElementRect {
                left: 0.0,
                top: 0.0,
                width: 800.0,
                height: 300_000.0,
            },
            styles: GridStyles {
                grid_template_columns: "1fr 1fr".into(),
                grid_auto_flow: "row".into(),
                ..GridStyles::default()
            },
        },
        0,
    );

    // Frame ticks inside the debounce window start nothing.
    println!("t=0   started={}", controller.pump(0));
    println!("t=16  started={}", controller.pump(16));
    println!("t=32  started={}", controller.pump(32));
    block_on(controller.settle());
    println!(
        "buffer_len={}, content_size={:?}",
        controller.buffer().len(),
        controller.content_size()
    );

    // A fast scroll burst: only the final range is fetched.
    for (frame, top) in [(48u64, -800.0), (64, -2400.0), (80, -4800.0)] {
        controller.on_scroll(
            ElementRect {
                left: 0.0,
                top,
                width: 800.0,
                height: 300_000.0,
            },
            frame,
        );
        controller.pump(frame);
    }
    println!("t=110 started={}", controller.pump(110));
    block_on(controller.settle());

    let first = &controller.buffer()[0];
    println!(
        "after scroll: first index={} value={:?}",
        first.index, first.value
    );
}
