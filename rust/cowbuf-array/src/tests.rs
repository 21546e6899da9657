use crate::{ArrayData, ArrayFlags, stats};

fn bytes(data: &[u8]) -> ArrayData<u8> {
    ArrayData::from_slice(data)
}

fn log2_ceil(n: usize) -> u64 {
    (usize::BITS - (n - 1).leading_zeros()) as u64
}

#[test]
fn test_new_does_not_allocate() {
    let before = stats::snapshot();
    let a = ArrayData::<u16>::new();
    assert!(a.is_empty());
    assert_eq!(a.capacity(), 0);
    assert!(a.is_static());
    assert!(!a.is_detached());
    assert_eq!(a.ref_count(), 0);
    assert_eq!(a.terminator(), Some(0));
    assert_eq!(a.flags(), ArrayFlags::empty());
    assert_eq!(stats::snapshot().since(&before).allocations, 0);

    let b = ArrayData::<u16>::with_capacity(0);
    assert!(b.is_static());
    assert_eq!(ArrayData::<u8>::default(), ArrayData::new());
}

#[test]
fn test_from_slice() {
    let a = bytes(b"hello");
    assert_eq!(a.len(), 5);
    assert_eq!(a.capacity(), 5);
    assert_eq!(a.as_slice(), b"hello");
    assert_eq!(a.first(), Some(b'h'));
    assert_eq!(a.last(), Some(b'o'));
    assert_eq!(a.get(5), None);
    assert_eq!(a.terminator(), Some(0));
    assert!(a.is_detached());
    assert_eq!(a.flags(), ArrayFlags::MUTABLE | ArrayFlags::OWNS_MEMORY);
    a.verify_invariants();
}

#[test]
fn test_reserve_on_empty() {
    let mut a = ArrayData::<u16>::new();
    a.reserve(100);
    assert!(a.capacity() >= 100);
    assert_eq!(a.len(), 0);
    assert!(a.flags().contains(ArrayFlags::CAPACITY_RESERVED));
    a.verify_invariants();

    let before = stats::snapshot();
    for i in 0..100 {
        a.push(i);
    }
    let s = stats::snapshot().since(&before);
    assert_eq!(s.allocations, 0);
    assert_eq!(s.reallocations, 0);
    assert_eq!(a.len(), 100);
    assert_eq!(a.get(99), Some(99));
}

#[test]
fn test_reserve_zero_is_noop() {
    let before = stats::snapshot();
    let mut a = ArrayData::<u8>::new();
    a.reserve(0);
    assert!(a.is_static());
    assert_eq!(stats::snapshot().since(&before).allocations, 0);
}

#[test]
fn test_reserve_never_truncates() {
    let mut a = bytes(b"0123456789");
    a.reserve(3);
    assert_eq!(a.as_slice(), b"0123456789");
    assert!(a.capacity() >= 10);
    assert!(a.flags().contains(ArrayFlags::CAPACITY_RESERVED));
}

#[test]
fn test_reserve_detaches_shared() {
    let a = bytes(b"abc");
    let mut b = a.clone();
    b.reserve(64);
    assert!(b.capacity() >= 64);
    assert!(!a.is_shared_with(&b));
    assert_eq!(a.as_slice(), b"abc");
    assert_eq!(b.as_slice(), b"abc");
    assert_eq!(a.ref_count(), 1);
}

#[test]
fn test_remove_all_then_append_reallocates_logarithmically() {
    let mut a = bytes(b"ABCDEFGH");
    a.remove(0, 8);
    assert!(a.is_empty());

    let before = stats::snapshot();
    for _ in 0..1000 {
        a.push(b'b');
    }
    let s = stats::snapshot().since(&before);
    assert_eq!(a.len(), 1000);
    assert!(a.iter().all(|&b| b == b'b'));
    assert!(
        s.allocations <= 2 * log2_ceil(1000) + 2,
        "too many allocations: {s:?}"
    );
}

#[test]
fn test_alternating_append_prepend_is_amortized() {
    const N: usize = 10_000;
    let mut a = ArrayData::<u16>::new();
    let before = stats::snapshot();
    for i in 0..N {
        if i % 2 == 0 {
            a.push(i as u16);
        } else {
            a.push_front(i as u16);
        }
    }
    let s = stats::snapshot().since(&before);
    assert_eq!(a.len(), N);
    assert_eq!(a.first(), Some((N - 1) as u16));
    assert_eq!(a.last(), Some((N - 2) as u16));
    assert!(
        s.reallocations <= 2 * log2_ceil(N) + 8,
        "too many reallocations: {s:?}"
    );
    assert!(
        s.elements_copied <= 4 * N as u64,
        "too many copies: {s:?}"
    );
    a.verify_invariants();
}

#[test]
fn test_prepend_only_is_amortized() {
    const N: usize = 5_000;
    let mut a = ArrayData::<u8>::new();
    let before = stats::snapshot();
    for i in 0..N {
        a.push_front(i as u8);
    }
    let s = stats::snapshot().since(&before);
    assert_eq!(a.len(), N);
    assert_eq!(a.first(), Some((N - 1) as u8));
    assert_eq!(a.last(), Some(0));
    assert!(s.reallocations <= 2 * log2_ceil(N) + 8, "{s:?}");
    assert!(s.elements_copied <= 4 * N as u64, "{s:?}");
}

#[test]
fn test_insert_at_end_matches_append() {
    let mut seed = bytes(b"abcd");
    seed.remove(0, 2);
    seed.push(b'e');
    for base in [ArrayData::new(), bytes(b"xyz"), seed] {
        let mut a = base.clone();
        let mut b = base.clone();
        drop(base);
        for k in 0..40u8 {
            a.append(&[k, k]);
            let len = b.len();
            b.insert(len, &[k, k]);
            assert_eq!(a, b);
            assert_eq!(a.capacity(), b.capacity());
            assert_eq!(a.free_space_at_begin(), b.free_space_at_begin());
            assert_eq!(a.free_space_at_end(), b.free_space_at_end());
        }
    }
}

#[test]
fn test_insert_past_end_clamps() {
    let mut a = bytes(b"ab");
    a.insert(100, b"cd");
    assert_eq!(a.as_slice(), b"abcd");
}

#[test]
fn test_insert_shifts_shorter_head() {
    let mut a: ArrayData<u8> = (0..10).collect();
    a.remove(0, 4);
    assert_eq!(a.free_space_at_begin(), 4);

    let before = stats::snapshot();
    a.insert(1, &[99]);
    let s = stats::snapshot().since(&before);
    assert_eq!(a.as_slice(), &[4, 99, 5, 6, 7, 8, 9]);
    assert_eq!(a.free_space_at_begin(), 3);
    assert_eq!(s.allocations, 0);
    a.verify_invariants();
}

#[test]
fn test_insert_shifts_tail() {
    let mut a = ArrayData::<u8>::with_capacity(16);
    a.append(&[0, 1, 2, 3, 4, 5]);
    a.insert(4, &[7, 7]);
    assert_eq!(a.as_slice(), &[0, 1, 2, 3, 7, 7, 4, 5]);
    assert_eq!(a.free_space_at_begin(), 0);
    assert_eq!(a.capacity(), 16);
}

#[test]
fn test_remove_prefix_does_not_copy() {
    let mut a: ArrayData<u16> = (0..100).collect();
    let cap = a.capacity();
    let before = stats::snapshot();
    a.remove(0, 30);
    let s = stats::snapshot().since(&before);
    assert_eq!(s.elements_copied, 0);
    assert_eq!(s.allocations, 0);
    assert_eq!(a.len(), 70);
    assert_eq!(a.first(), Some(30));
    assert_eq!(a.free_space_at_begin(), 30);
    assert_eq!(a.capacity(), cap);
    a.verify_invariants();
}

#[test]
fn test_remove_shifts_shorter_side() {
    let mut a: ArrayData<u8> = ArrayData::from_slice(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    a.remove(2, 3);
    assert_eq!(a.as_slice(), &[0, 1, 5, 6, 7, 8, 9]);
    assert_eq!(a.free_space_at_begin(), 3);

    let mut b: ArrayData<u8> = ArrayData::from_slice(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    b.remove(6, 2);
    assert_eq!(b.as_slice(), &[0, 1, 2, 3, 4, 5, 8, 9]);
    assert_eq!(b.free_space_at_begin(), 0);
    assert_eq!(b.free_space_at_end(), 2);
    b.verify_invariants();
}

#[test]
fn test_remove_clamps() {
    let mut a = bytes(b"abcdef");
    a.remove(10, 2);
    assert_eq!(a.as_slice(), b"abcdef");
    a.remove(4, 100);
    assert_eq!(a.as_slice(), b"abcd");
    a.remove(1, 0);
    assert_eq!(a.as_slice(), b"abcd");
}

#[test]
fn test_remove_from_shared() {
    let a = bytes(b"abcdef");
    let mut b = a.clone();
    b.remove(1, 2);
    assert_eq!(a.as_slice(), b"abcdef");
    assert_eq!(b.as_slice(), b"adef");
    assert_eq!(a.ref_count(), 1);
    assert_eq!(b.ref_count(), 1);
    b.verify_invariants();
}

#[test]
fn test_append_readjusts_instead_of_reallocating() {
    let mut a: ArrayData<u8> = ArrayData::from_slice(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    a.remove(0, 5);
    assert_eq!(a.free_space_at_end(), 0);

    let before = stats::snapshot();
    a.push(10);
    let s = stats::snapshot().since(&before);
    assert_eq!(s.allocations, 0);
    assert_eq!(s.relocations, 1);
    assert_eq!(a.capacity(), 10);
    assert_eq!(a.free_space_at_begin(), 0);
    assert_eq!(a.as_slice(), &[5, 6, 7, 8, 9, 10]);
    a.verify_invariants();
}

#[test]
fn test_prepend_readjusts_instead_of_reallocating() {
    let mut a: ArrayData<u8> = ArrayData::from_slice(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    a.truncate(3);
    assert_eq!(a.free_space_at_begin(), 0);

    let before = stats::snapshot();
    a.push_front(42);
    let s = stats::snapshot().since(&before);
    assert_eq!(s.allocations, 0);
    assert_eq!(s.relocations, 1);
    assert_eq!(a.capacity(), 10);
    assert_eq!(a.free_space_at_begin(), 3);
    assert_eq!(a.as_slice(), &[42, 0, 1, 2]);
    a.verify_invariants();
}

#[test]
fn test_prepend_keeps_balanced_slack() {
    let mut a = bytes(b"abcdefgh");
    a.prepend(b"12");
    assert_eq!(a.as_slice(), b"12abcdefgh");
    assert!(a.free_space_at_begin() > 0);
    assert!(a.free_space_at_end() > 0);
    a.verify_invariants();
}

#[test]
fn test_cow_isolation() {
    let a = bytes(b"shared");
    let mut b = a.clone();
    assert_eq!(a.ref_count(), 2);
    assert!(a.is_shared());
    assert!(a.is_shared_with(&b));

    b.append(b"!");
    assert_eq!(a.as_slice(), b"shared");
    assert_eq!(a.len(), 6);
    assert_eq!(b.as_slice(), b"shared!");
    assert_eq!(a.ref_count(), 1);
    assert_eq!(b.ref_count(), 1);
    assert!(!a.is_shared_with(&b));
    a.verify_invariants();
    b.verify_invariants();
}

#[test]
fn test_cow_mutating_original() {
    let mut a: ArrayData<u16> = ArrayData::from_slice(&[1, 2, 3]);
    let b = a.clone();
    a.set(0, 9);
    a.truncate(2);
    assert_eq!(a.as_slice(), &[9, 2]);
    assert_eq!(b.as_slice(), &[1, 2, 3]);
    assert_eq!(b.ref_count(), 1);
}

#[test]
fn test_set_out_of_bounds_does_not_detach() {
    let a = bytes(b"abc");
    let mut b = a.clone();
    b.set(3, b'x');
    assert!(a.is_shared_with(&b));
    b.set(0, b'x');
    assert_eq!(b.as_slice(), b"xbc");
    assert_eq!(a.as_slice(), b"abc");
}

#[test]
fn test_detach_keeps_slack_at_both_ends() {
    let mut a = ArrayData::<u8>::new();
    for b in 0..20u8 {
        a.push_front(b);
    }
    let (begin, end) = (a.free_space_at_begin(), a.free_space_at_end());
    assert!(begin > 0);
    assert!(end > 0);

    let mut b = a.clone();
    b.detach();
    assert!(!a.is_shared_with(&b));
    assert_eq!(b.as_slice(), a.as_slice());
    assert_eq!(b.capacity(), a.capacity());
    assert_eq!(b.free_space_at_begin(), begin);
    assert_eq!(b.free_space_at_end(), end);
    b.verify_invariants();

    let mut c = a.clone();
    c.set(0, 99);
    assert_eq!(c.free_space_at_begin(), begin);
    assert_eq!(c.free_space_at_end(), end);
    assert_eq!(a.first(), Some(19));
}

#[test]
fn test_raw_data_view() {
    let backing: Vec<u16> = vec![1, 2, 3, 4];
    let before = stats::snapshot();
    // SAFETY: `backing` outlives every handle below and is not written.
    let mut a = unsafe { ArrayData::from_raw_data(backing.as_ptr(), backing.len()) };
    let view = a.clone();
    let sub = a.mid(1, Some(2));
    assert_eq!(stats::snapshot().since(&before).allocations, 0);

    assert_eq!(a.as_ptr(), backing.as_ptr());
    assert!(a.is_raw_data());
    assert_eq!(a.flags(), ArrayFlags::RAW_DATA);
    assert_eq!(a.capacity(), 0);
    assert_eq!(a.terminator(), None);
    assert!(a.is_shared_with(&view));
    assert_eq!(sub.as_ptr(), backing[1..].as_ptr());
    assert_eq!(sub.as_slice(), &[2, 3]);

    a.push(5);
    assert_ne!(a.as_ptr(), backing.as_ptr());
    assert!(!a.is_raw_data());
    assert!(a.is_detached());
    assert_eq!(a.as_slice(), &[1, 2, 3, 4, 5]);
    assert_eq!(view.as_ptr(), backing.as_ptr());
    assert_eq!(view.as_slice(), &[1, 2, 3, 4]);
}

#[test]
fn test_raw_data_nul_terminated_detaches() {
    let backing = *b"abcdef";
    // SAFETY: `backing` outlives the handle.
    let mut a = unsafe { ArrayData::from_raw_data(backing.as_ptr(), 3) };
    assert_eq!(a.nul_terminated(), b"abc\0");
    assert!(!a.is_raw_data());
    assert_eq!(a.terminator(), Some(0));
}

#[test]
fn test_raw_data_null_pointer() {
    // SAFETY: a null pointer with zero length is accepted.
    let a = unsafe { ArrayData::<u8>::from_raw_data(std::ptr::null(), 0) };
    assert!(a.is_empty());
    assert!(a.is_static());
}

#[test]
fn test_static_view() {
    static DATA: [u8; 5] = *b"hello";
    let mut a = ArrayData::from_static(&DATA);
    assert_eq!(a.as_ptr(), DATA.as_ptr());
    assert!(a.is_static());
    assert!(!a.is_detached());
    assert_eq!(a.terminator(), None);
    assert_eq!(a.left(4).as_ptr(), DATA.as_ptr());

    a.set(0, b'j');
    assert_eq!(a.as_slice(), b"jello");
    assert_ne!(a.as_ptr(), DATA.as_ptr());
    assert_eq!(&DATA, b"hello");
}

#[test]
fn test_nul_terminated() {
    let mut a = bytes(b"abc");
    assert_eq!(a.nul_terminated(), b"abc\0");
    let mut e = ArrayData::<u16>::new();
    assert_eq!(e.nul_terminated(), &[0]);
    assert!(e.is_static());
}

#[test]
fn test_truncate_and_chop() {
    let mut a = bytes(b"abcdef");
    let cap = a.capacity();
    a.truncate(4);
    assert_eq!(a.as_slice(), b"abcd");
    assert_eq!(a.capacity(), cap);
    assert_eq!(a.terminator(), Some(0));
    a.truncate(10);
    assert_eq!(a.as_slice(), b"abcd");
    a.chop(1);
    assert_eq!(a.as_slice(), b"abc");
    a.chop(10);
    assert!(a.is_empty());
    assert!(a.is_detached());
}

#[test]
fn test_truncate_shared() {
    let a = bytes(b"abcdef");
    let mut b = a.clone();
    b.truncate(2);
    assert_eq!(b.as_slice(), b"ab");
    assert_eq!(a.as_slice(), b"abcdef");

    let mut c = a.clone();
    c.truncate(0);
    assert!(c.is_static());
    assert_eq!(a.ref_count(), 1);
}

#[test]
fn test_clear() {
    let mut a = bytes(b"abc");
    a.clear();
    assert!(a.is_empty());
    assert!(a.is_static());

    let mut b = ArrayData::<u8>::with_capacity(50);
    b.append(b"0123456789");
    b.clear();
    assert!(b.is_empty());
    assert!(b.is_detached());
    assert_eq!(b.capacity(), 50);
    b.verify_invariants();

    let mut c = ArrayData::<u8>::with_capacity(50);
    c.append(b"xyz");
    let d = c.clone();
    c.clear();
    assert!(c.is_static());
    assert_eq!(d.as_slice(), b"xyz");
}

#[test]
fn test_detach_keeps_reserved_capacity() {
    let mut a = ArrayData::<u16>::with_capacity(64);
    a.append(&[1, 2, 3]);
    let mut b = a.clone();
    b.push(4);
    assert_eq!(b.capacity(), 64);
    assert!(b.flags().contains(ArrayFlags::CAPACITY_RESERVED));
    assert_eq!(a.as_slice(), &[1, 2, 3]);
}

#[test]
fn test_resize() {
    let mut a = bytes(b"ab");
    a.resize(5);
    assert_eq!(a.as_slice(), b"ab\0\0\0");
    a.resize_with_value(7, b'z');
    assert_eq!(a.as_slice(), b"ab\0\0\0zz");
    a.resize(1);
    assert_eq!(a.as_slice(), b"a");
    a.resize(0);
    assert!(a.is_empty());
    a.verify_invariants();

    let f = ArrayData::filled(4, 7u32);
    assert_eq!(f.as_slice(), &[7, 7, 7, 7]);
}

#[test]
fn test_squeeze() {
    let mut a = ArrayData::<u16>::new();
    for i in 0..37 {
        a.push_front(i);
    }
    a.reserve(200);
    assert!(a.capacity() >= 200);
    a.squeeze();
    assert_eq!(a.capacity(), 37);
    assert_eq!(a.free_space_at_begin(), 0);
    assert!(!a.flags().contains(ArrayFlags::CAPACITY_RESERVED));
    assert_eq!(a.first(), Some(36));
    a.verify_invariants();

    let mut e = ArrayData::<u16>::with_capacity(10);
    e.squeeze();
    assert!(e.is_static());
}

#[test]
fn test_squeeze_shared_is_noop() {
    let mut a = ArrayData::<u8>::with_capacity(100);
    a.append(b"abc");
    let b = a.clone();
    a.squeeze();
    assert_eq!(a.capacity(), 100);
    assert!(a.is_shared_with(&b));
}

#[test]
fn test_fill() {
    let mut a = bytes(b"abc");
    a.fill(b'x', None);
    assert_eq!(a.as_slice(), b"xxx");
    a.fill(b'y', Some(5));
    assert_eq!(a.as_slice(), b"yyyyy");
    a.fill(b'z', Some(2));
    assert_eq!(a.as_slice(), b"zz");
}

#[test]
fn test_assign_reuses_storage() {
    let mut a = ArrayData::<u8>::with_capacity(20);
    a.append(b"0123456789");
    a.remove(0, 8);
    let before = stats::snapshot();
    a.assign(b"abcdefghijklmnop");
    assert_eq!(stats::snapshot().since(&before).allocations, 0);
    assert_eq!(a.as_slice(), b"abcdefghijklmnop");
    assert_eq!(a.capacity(), 20);
    a.verify_invariants();

    let b = a.clone();
    a.assign(b"xy");
    assert_eq!(a.as_slice(), b"xy");
    assert_eq!(b.as_slice(), b"abcdefghijklmnop");

    a.assign(&[]);
    assert!(a.is_empty());
}

#[test]
fn test_assign_iter_and_extend() {
    let mut a = bytes(b"old");
    a.assign_iter(b"new content".iter().copied());
    assert_eq!(a.as_slice(), b"new content");

    a.extend([b'!', b'?']);
    a.extend(b"..".iter());
    assert_eq!(a.as_slice(), b"new content!?..");

    let collected: ArrayData<u32> = (1..=4).collect();
    assert_eq!(collected.as_slice(), &[1, 2, 3, 4]);
}

#[test]
fn test_replace() {
    let mut a = bytes(b"hello world");
    let ptr = a.as_ptr();
    a.replace(6, 5, b"there");
    assert_eq!(a.as_slice(), b"hello there");
    assert_eq!(a.as_ptr(), ptr);

    a.replace(0, 5, b"hi");
    assert_eq!(a.as_slice(), b"hi there");
    a.replace(3, 100, b"you all");
    assert_eq!(a.as_slice(), b"hi you all");
    a.replace(100, 3, b"!");
    assert_eq!(a.as_slice(), b"hi you all!");
    a.verify_invariants();
}

#[test]
fn test_mid_left_right() {
    let a = bytes(b"abcdefgh");
    assert!(a.mid(0, None).is_shared_with(&a));
    assert!(a.left(100).is_shared_with(&a));
    assert!(a.right(8).is_shared_with(&a));
    assert_eq!(a.mid(2, Some(3)).as_slice(), b"cde");
    assert_eq!(a.mid(6, Some(100)).as_slice(), b"gh");
    assert_eq!(a.mid(5, None).as_slice(), b"fgh");
    assert!(a.mid(8, None).is_empty());
    assert!(a.mid(20, Some(2)).is_empty());
    assert!(a.mid(2, Some(0)).is_empty());
    assert_eq!(a.left(3).as_slice(), b"abc");
    assert_eq!(a.right(3).as_slice(), b"fgh");
    assert_eq!(a.chopped(3).as_slice(), b"abcde");
    assert!(a.chopped(30).is_empty());
    assert_eq!(a.to_vec(), b"abcdefgh".to_vec());
}

#[test]
fn test_append_array_adopts_storage() {
    let a = bytes(b"abc");
    let mut b = ArrayData::new();
    b.append_array(&a);
    assert!(b.is_shared_with(&a));
    b.append_array(&a);
    assert_eq!(b.as_slice(), b"abcabc");
    assert_eq!(a.as_slice(), b"abc");
}

#[test]
fn test_traits() {
    let a = bytes(b"abc");
    let b = bytes(b"abd");
    assert!(a < b);
    assert_eq!(a, bytes(b"abc"));
    assert!(a == *b"abc".as_slice());
    assert_eq!(&a[1..], b"bc");
    let sum: u32 = (&a).into_iter().map(|&x| x as u32).sum();
    assert_eq!(sum, (b'a' + b'b') as u32 + b'c' as u32);
    assert!(format!("{a:?}").starts_with("ArrayData"));

    let mut set = std::collections::HashSet::new();
    set.insert(a.clone());
    assert!(set.contains(b"abc".as_slice()));
    assert_eq!(ArrayData::from(vec![1u16, 2]).as_slice(), &[1, 2]);
}

#[test]
fn test_shared_across_threads() {
    let a: ArrayData<u16> = (0..1000).collect();
    std::thread::scope(|s| {
        for t in 0..4u16 {
            let mut local = a.clone();
            let a = &a;
            s.spawn(move || {
                assert_eq!(a.len(), 1000);
                local.push(t);
                local.set(0, t);
                assert_eq!(local.len(), 1001);
                assert_eq!(local.last(), Some(t));
                assert!(local.is_detached());
            });
        }
    });
    assert_eq!(a.ref_count(), 1);
    assert_eq!(a.first(), Some(0));
    assert_eq!(a.len(), 1000);
}

#[test]
#[should_panic(expected = "capacity overflow")]
fn test_reserve_overflow() {
    let mut a = ArrayData::<u32>::new();
    a.reserve(usize::MAX / 2);
}

#[test]
#[should_panic(expected = "capacity overflow")]
fn test_resize_overflow() {
    let mut a = ArrayData::<u16>::new();
    a.resize(usize::MAX);
}

#[test]
fn test_random_operations_against_model() {
    let mut rng = fastrand::Rng::with_seed(0x5eed);
    for _ in 0..20 {
        let mut array = ArrayData::<u16>::new();
        let mut model: Vec<u16> = Vec::new();
        let mut snapshots: Vec<(ArrayData<u16>, Vec<u16>)> = Vec::new();

        for _ in 0..400 {
            let len = model.len();
            match rng.u32(0..11) {
                0 => {
                    let v = rng.u16(..);
                    array.push(v);
                    model.push(v);
                }
                1 => {
                    let v = rng.u16(..);
                    array.push_front(v);
                    model.insert(0, v);
                }
                2 => {
                    let data: Vec<u16> = (0..rng.usize(0..8)).map(|_| rng.u16(..)).collect();
                    let at = rng.usize(0..=len + 2);
                    array.insert(at, &data);
                    let at = at.min(len);
                    model.splice(at..at, data);
                }
                3 => {
                    let at = rng.usize(0..=len + 1);
                    let count = rng.usize(0..6);
                    array.remove(at, count);
                    if at < len {
                        let end = (at + count).min(len);
                        model.drain(at..end);
                    }
                }
                4 => {
                    let n = rng.usize(0..=len + 2);
                    array.truncate(n);
                    model.truncate(n);
                }
                5 => {
                    array.reserve(rng.usize(0..64));
                }
                6 => {
                    array.squeeze();
                }
                7 => {
                    let n = rng.usize(0..len + 8);
                    array.resize(n);
                    model.resize(n, 0);
                }
                8 => {
                    snapshots.push((array.clone(), model.clone()));
                }
                9 => {
                    if len > 0 {
                        let i = rng.usize(0..len);
                        let v = rng.u16(..);
                        array.set(i, v);
                        model[i] = v;
                    }
                }
                _ => {
                    let at = rng.usize(0..=len);
                    let count = rng.usize(0..4);
                    let data: Vec<u16> = (0..rng.usize(0..4)).map(|_| rng.u16(..)).collect();
                    array.replace(at, count, &data);
                    let end = (at + count).min(len);
                    model.splice(at..end, data);
                }
            }
            array.verify_invariants();
            assert_eq!(array.as_slice(), model.as_slice());
        }

        for (snapshot, expected) in &snapshots {
            snapshot.verify_invariants();
            assert_eq!(snapshot.as_slice(), expected.as_slice());
        }
    }
}
