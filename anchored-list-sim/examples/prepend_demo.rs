use anchored_list::{AnchorOptions, Rect};
use anchored_list_sim::{FrameReport, SimList, SimView};

const ITEM_HEIGHTS: [u32; 5] = [50, 75, 100, 125, 150];

#[derive(Clone, Debug)]
struct Item {
    key: u64,
    height: u32,
}

struct Feed {
    items: Vec<Item>,
    next_key: u64,
    rng: u64,
}

impl Feed {
    fn new(seed: u64) -> Self {
        Self {
            items: Vec::new(),
            next_key: 0,
            rng: seed,
        }
    }

    fn create_item(&mut self) -> Item {
        self.rng = self
            .rng
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let height = ITEM_HEIGHTS[((self.rng >> 33) % ITEM_HEIGHTS.len() as u64) as usize];
        let key = self.next_key;
        self.next_key += 1;
        Item { key, height }
    }

    fn add_to_top(&mut self) {
        let item = self.create_item();
        self.items.insert(0, item);
    }

    fn add_to_bottom(&mut self) {
        let item = self.create_item();
        self.items.push(item);
    }

    fn load_more_above(&mut self, amount: usize) {
        let mut fresh: Vec<Item> = (0..amount).map(|_| self.create_item()).collect();
        fresh.append(&mut self.items);
        self.items = fresh;
    }

    fn load_more_below(&mut self, amount: usize) {
        for _ in 0..amount {
            self.add_to_bottom();
        }
    }
}

fn describe(report: Option<&FrameReport<u64>>) -> String {
    match report.and_then(FrameReport::anchor) {
        Some(row) => format!("key={} top={}", row.key, row.top),
        None => "empty".to_string(),
    }
}

fn step(sim: &mut SimList<Item, u64>, feed: &Feed, label: &str) {
    let before = sim.frame();
    let added = sim.set_rows(feed.items.clone());
    let frames = sim.run_until_idle(8);
    let corrections: Vec<u64> = frames
        .iter()
        .filter_map(|f| f.pre_commit.or(f.next_tick))
        .map(|c| c.offset)
        .collect();
    println!(
        "{label:<16} added_to_top={added} frames={} corrections={corrections:?} \
         anchor: {} -> {} off={}",
        frames.len(),
        describe(Some(&before)),
        describe(frames.last()),
        sim.view().map(SimView::offset).unwrap_or_default(),
    );
}

fn main() {
    let options = AnchorOptions::new(|item: &Item, _| item.key)
        .with_min_scroll_position_to_maintain(0);
    let view = SimView::new(Rect {
        main: 600,
        cross: 360,
    })
    .with_pinned_head(8);
    let mut sim = SimList::new(options, view, |item: &Item| item.height);

    let mut feed = Feed::new(2018);
    feed.load_more_below(20);
    sim.set_rows(feed.items.clone());
    sim.run_until_idle(8);
    sim.scroll_to(700);

    feed.add_to_top();
    step(&mut sim, &feed, "add top");

    feed.add_to_bottom();
    step(&mut sim, &feed, "add bottom");

    feed.load_more_above(5);
    step(&mut sim, &feed, "load more above");

    feed.load_more_below(5);
    step(&mut sim, &feed, "load more below");

    // Resting on the bottom edge: the correction runs on the next tick instead.
    let bottom = sim.view().map(|v| v.content_height()).unwrap_or_default();
    sim.scroll_to(bottom);
    feed.load_more_above(3);
    step(&mut sim, &feed, "above at bottom");

    sim.scroll_to(0);
    feed.add_to_top();
    step(&mut sim, &feed, "add top at 0");
}
