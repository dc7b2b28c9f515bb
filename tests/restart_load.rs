//! End-to-end restart load scenarios on a single rank.

use field_restart::prelude::*;

type TestField = Field<f64, 2, 3>;

/// A 4x4 pattern with 16 distinct nonzero values, row-major.
fn pattern() -> Vec<f64> {
    (0..16).map(|i| f64::from(i) * 10.0 + 1.0).collect()
}

fn layout_4x4() -> GridLayout<2> {
    GridLayout::new([4, 4], [1, 1]).unwrap()
}

/// One rank, sliding axis 1, window covering the whole local domain.
fn window_full(slide_count: usize) -> MovingWindowState<2> {
    MovingWindowState::unslid(1, [4, 4], [1, 1]).with_slide_count(slide_count)
}

fn topo_single() -> CartesianTopology<2> {
    CartesianTopology::new([0, 0], [1, 1], [4, 4])
}

/// Stage all three components of field `E` at `step`, component x holding the
/// pattern, y and z zeroed, covering `domain`.
fn stage_checkpoint(store: &MemoryStore<f64, 2>, step: u64, domain: DomainDescriptor<2>) {
    store
        .insert(step, "fields/E/x", domain, pattern())
        .unwrap();
    store
        .insert(step, "fields/E/y", domain, vec![0.0; 16])
        .unwrap();
    store
        .insert(step, "fields/E/z", domain, vec![0.0; 16])
        .unwrap();
}

#[test]
fn end_to_end_no_slide() {
    let store = MemoryStore::new();
    stage_checkpoint(&store, 100, DomainDescriptor::new([0, 0], [4, 4]));
    let device = MirrorDevice::new();
    let mut field: TestField = Field::new("E", layout_4x4());

    // scribble over the buffer to prove the load defines every cell
    field.cell_mut(&[0, 0])[0] = -7.0;
    field.cell_mut(&[2, 2])[1] = -7.0;

    load_field(
        &mut field,
        100,
        &topo_single(),
        &FixedWindow(window_full(0)),
        &store,
        &device,
    )
    .unwrap();

    let pat = pattern();
    for r in 0..4 {
        for c in 0..4 {
            let cell = field.cell(&[r + 1, c + 1]);
            assert_eq!(cell[0], pat[r * 4 + c], "interior x at ({r},{c})");
            assert_eq!(cell[1], 0.0, "interior y at ({r},{c})");
            assert_eq!(cell[2], 0.0, "interior z at ({r},{c})");
        }
    }
    // guard ring is at the neutral value on every axis
    for r in 0..6 {
        for c in 0..6 {
            if r == 0 || r == 5 || c == 0 || c == 5 {
                assert_eq!(field.cell(&[r, c]), &[0.0; 3], "guard at ({r},{c})");
            }
        }
    }
    // the device gate committed exactly once and saw the final host state
    assert_eq!(device.pushes(), 1);
    assert_eq!(device.completed(), 1);
    assert_eq!(device.device_buffer(), field.host().as_slice().to_vec());
}

#[test]
fn slide_shifts_the_read_key_but_not_the_local_landing() {
    // slide_count = 2 with local domain 4 on axis 1: read offset shifts by 8
    let slid = window_full(2);
    let domain = read_domain(&topo_single(), &slid);
    assert_eq!(domain.offset, [0, 8]);
    assert_eq!(read_domain(&topo_single(), &window_full(0)).offset, [0, 0]);

    let store = MemoryStore::new();
    stage_checkpoint(&store, 100, DomainDescriptor::new([0, 8], [4, 4]));
    let device = MirrorDevice::new();
    let mut field: TestField = Field::new("E", layout_4x4());

    load_field(
        &mut field,
        100,
        &topo_single(),
        &FixedWindow(slid),
        &store,
        &device,
    )
    .unwrap();

    // the slide changed which global region was fetched, not where it lands
    let pat = pattern();
    for r in 0..4 {
        for c in 0..4 {
            assert_eq!(field.cell(&[r + 1, c + 1])[0], pat[r * 4 + c]);
        }
    }
    assert_eq!(device.completed(), 1);
}

#[test]
fn slide_against_an_unslid_checkpoint_misses_the_domain() {
    let store = MemoryStore::new();
    stage_checkpoint(&store, 100, DomainDescriptor::new([0, 0], [4, 4]));
    let mut field: TestField = Field::new("E", layout_4x4());

    let err = load_field(
        &mut field,
        100,
        &topo_single(),
        &FixedWindow(window_full(2)),
        &store,
        &MirrorDevice::new(),
    )
    .unwrap_err();
    assert!(matches!(err, RestartError::DomainOutOfBounds { .. }));
    assert_eq!(err.kind(), RestartErrorKind::StoreRead);
}

#[test]
fn partial_local_window_leaves_hidden_interior_neutral() {
    // window valid only on columns 1..4 of the interior
    let mut window = window_full(0);
    window.global_window_offset = [0, 1];
    window.global_window_size = [4, 3];
    window.local_window_offset = [0, 1];
    window.local_window_size = [4, 3];

    let store = MemoryStore::new();
    let domain = DomainDescriptor::new([0, 1], [4, 3]);
    let values: Vec<f64> = (0..12).map(|i| f64::from(i) + 1.0).collect();
    store.insert(5, "fields/E/x", domain, values.clone()).unwrap();
    store.insert(5, "fields/E/y", domain, vec![0.0; 12]).unwrap();
    store.insert(5, "fields/E/z", domain, vec![0.0; 12]).unwrap();

    let mut field: TestField = Field::new("E", layout_4x4());
    load_field(
        &mut field,
        5,
        &topo_single(),
        &FixedWindow(window),
        &store,
        &HostDevice,
    )
    .unwrap();

    for r in 0..4 {
        // interior column 0 is outside the visible window: neutral
        assert_eq!(field.cell(&[r + 1, 1]), &[0.0; 3]);
        for c in 0..3 {
            assert_eq!(field.cell(&[r + 1, c + 2])[0], values[r * 3 + c]);
        }
    }
}

#[test]
fn registry_lookup_load() {
    let store = MemoryStore::new();
    stage_checkpoint(&store, 100, DomainDescriptor::new([0, 0], [4, 4]));
    let mut registry: FieldRegistry<f64, 2, 3> = FieldRegistry::new();
    registry.insert(Field::new("E", layout_4x4())).unwrap();

    load_registered_field(
        &mut registry,
        "E",
        100,
        &topo_single(),
        &FixedWindow(window_full(0)),
        &store,
        &HostDevice,
    )
    .unwrap();
    assert_eq!(registry.get("E").unwrap().cell(&[1, 1])[0], pattern()[0]);

    let err = load_registered_field(
        &mut registry,
        "B",
        100,
        &topo_single(),
        &FixedWindow(window_full(0)),
        &store,
        &HostDevice,
    )
    .unwrap_err();
    assert_eq!(err, RestartError::UnknownField("B".into()));
}
