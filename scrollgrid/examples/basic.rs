use scrollgrid::{
    ElementRect, GridLayout, GridPipeline, GridStyles, ItemRect, ItemsByPage, PageResponse,
    PipelineOptions, WindowSize, provider_from_vec,
};

fn main() {
    // A 10,000-item catalogue fetched 40 items at a time, shown in a
    // 4-column grid inside a 1280x800 window.
    let catalogue: Vec<String> = (0..10_000).map(|i| format!("item-{i}")).collect();

    let options = PipelineOptions::new(catalogue.len(), 40)
        .with_window(WindowSize {
            width: 1280.0,
            height: 800.0,
        })
        .with_page_provider(provider_from_vec(catalogue));
    let mut pipeline = GridPipeline::new(options);

    // The host reports the item size and the container's layout.
    pipeline.set_item_rect(ItemRect {
        width: 300.0,
        height: 200.0,
    });
    pipeline.apply_resize(
        GridLayout {
            rect: ElementRect {
                left: 0.0,
                top: 0.0,
                width: 1280.0,
                height: 500_000.0,
            },
            styles: GridStyles {
                row_gap: "10px".into(),
                column_gap: "10px".into(),
                grid_auto_flow: "row".into(),
                grid_template_columns: "1fr 1fr 1fr 1fr".into(),
                grid_template_rows: "".into(),
                ..GridStyles::default()
            },
        },
        0,
    );

    println!("content_size={:?}", pipeline.content_size());
    println!("buffer_meta={:?}", pipeline.buffer_meta());

    // An executor would await the provider here; this example resolves the
    // planned requests by hand (see scrollgrid-adapter for the async loop).
    let requests = pipeline.take_page_requests(0);
    println!("planned pages: {:?}", requests.iter().map(|r| r.page_number).collect::<Vec<_>>());
    for request in requests {
        let start = request.page_number * request.page_size;
        pipeline.apply_page_response(PageResponse {
            epoch: request.epoch,
            page: ItemsByPage {
                page_number: request.page_number,
                items: (start..start + request.page_size)
                    .map(|i| format!("item-{i}"))
                    .collect(),
            },
        });
    }

    let first = &pipeline.buffer()[0];
    println!(
        "buffer_len={}, first index={} value={:?} transform={}",
        pipeline.buffer().len(),
        first.index,
        first.value,
        first.style.transform
    );

    // Scroll four thousand pixels down; only the newly uncovered pages are
    // demanded again.
    pipeline.apply_scroll(
        ElementRect {
            left: 0.0,
            top: -4000.0,
            width: 1280.0,
            height: 500_000.0,
        },
        16,
    );
    let requests = pipeline.take_page_requests(16);
    println!(
        "after scroll: buffer_meta={:?}, new pages={:?}",
        pipeline.buffer_meta(),
        requests.iter().map(|r| r.page_number).collect::<Vec<_>>()
    );
}
