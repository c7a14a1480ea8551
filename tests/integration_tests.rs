// 統合テスト

use pigment::application::partition::{run_parallel, run_sequential};
use pigment::application::ProgressManager;
use pigment::domain::sample::{skincare_relation, AHA, BHA, BUFFET, ELAA, HIPPIE, RETINOL};
use pigment::domain::search::{ItemLimit, LeafBudget, SearchReport, SplitDepth};
use pigment::domain::ConflictMatrix;
use pigment::infrastructure::{
    DotRenderer, MemoryReportWriter, ParallelConfig, ParallelExecutor, ReportWriter,
};
use pigment::presentation::format_partition;
use pigment::{
    conflicts, linearize, minimum_partition, BigUint, ConflictRelation, Partition,
    PartitionService, SearchConfig,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 乱数で小さな衝突関係を作る（項目は 0..n、キーの並びも乱数）
fn random_relation(rng: &mut StdRng, n: u32, density: f64) -> ConflictRelation<u32> {
    let mut keys: Vec<u32> = (0..n).collect();
    for i in (1..keys.len()).rev() {
        let j = rng.gen_range(0..=i);
        keys.swap(i, j);
    }
    let mut rel = ConflictRelation::new();
    for &k in &keys {
        let list: Vec<u32> = (0..n).filter(|&o| o != k && rng.gen_bool(density)).collect();
        rel.insert(k, list);
    }
    rel
}

/// 全割り当て（n^n 通り）から妥当な分割の最小グループ数を求める
fn brute_force_min_groups(rel: &ConflictRelation<u32>) -> usize {
    let items = linearize(rel);
    let n = items.len();
    if n == 0 {
        return 0;
    }
    let mut best = n;
    let total = n.pow(n as u32);
    for code in 0..total {
        let mut labels = vec![0usize; n];
        let mut c = code;
        for label in labels.iter_mut() {
            *label = c % n;
            c /= n;
        }
        let used = {
            let mut seen = vec![false; n];
            labels.iter().for_each(|&l| seen[l] = true);
            seen.iter().filter(|&&s| s).count()
        };
        if used >= best {
            continue;
        }
        let ok = (0..n).all(|i| {
            (i + 1..n).all(|j| labels[i] != labels[j] || !conflicts(rel, &items[i], &items[j]))
        });
        if ok {
            best = used;
        }
    }
    best
}

/// 仕様上の性質
mod properties {
    use super::*;

    #[test]
    fn coverage_validity_minimality_on_random_inputs() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for round in 0..60 {
            let n = rng.gen_range(0..=6);
            let density = [0.0, 0.2, 0.4, 0.7, 1.0][round % 5];
            let rel = random_relation(&mut rng, n, density);
            let universe = linearize(&rel);
            let p = minimum_partition(&rel);

            assert!(p.covers(&universe), "coverage: {:?}", rel);
            assert!(p.is_valid(&rel), "validity: {:?}", rel);
            assert_eq!(p.group_count(), brute_force_min_groups(&rel), "minimality: {:?}", rel);
        }
    }

    #[test]
    fn no_conflicts_gives_one_group_in_universe_order() {
        let rel = ConflictRelation::new()
            .with("A", vec![])
            .with("B", vec![])
            .with("C", vec![])
            .with("D", vec![])
            .with("E", vec![]);
        assert_eq!(
            minimum_partition(&rel).into_groups(),
            vec![vec!["A", "B", "C", "D", "E"]]
        );
    }

    #[test]
    fn total_conflict_gives_singletons() {
        let rel = ConflictRelation::new()
            .with("A", vec!["B", "C", "D", "E"])
            .with("B", vec!["C", "D", "E"])
            .with("C", vec!["D", "E"])
            .with("D", vec!["E"]);
        assert_eq!(
            minimum_partition(&rel).into_groups(),
            vec![vec!["A"], vec!["B"], vec!["C"], vec!["D"], vec!["E"]]
        );
    }

    #[test]
    fn directional_declaration_symmetry() {
        let rel = ConflictRelation::new().with(1, vec![2, 3]).with(2, vec![3, 4]);
        assert_eq!(
            minimum_partition(&rel).into_groups(),
            vec![vec![1, 4], vec![2], vec![3]]
        );
    }

    #[test]
    fn repeated_runs_are_identical() {
        let mut rng = StdRng::seed_from_u64(7);
        let rel = random_relation(&mut rng, 7, 0.3);
        let first = minimum_partition(&rel);
        for _ in 0..5 {
            assert_eq!(minimum_partition(&rel), first);
        }
        let json = serde_json::to_string(&first).unwrap();
        assert_eq!(serde_json::to_string(&minimum_partition(&rel)).unwrap(), json);
    }

    #[test]
    fn skincare_sample() {
        let p = minimum_partition(&skincare_relation());
        assert_eq!(
            p.into_groups(),
            vec![
                vec![BUFFET.to_string()],
                vec![AHA.to_string(), BHA.to_string()],
                vec![HIPPIE.to_string(), ELAA.to_string()],
                vec![RETINOL.to_string()],
            ]
        );
    }
}

/// 逐次と並列の一致
mod parallel_equivalence {
    use super::*;

    #[test]
    fn parallel_reproduces_sequential_result() {
        let mut rng = StdRng::seed_from_u64(42);
        let executor = ParallelExecutor::new(ParallelConfig::new(4));
        for _ in 0..20 {
            let n = rng.gen_range(1..=8);
            let rel = random_relation(&mut rng, n, 0.35);
            let items = linearize(&rel);
            let matrix = ConflictMatrix::build(&rel, &items);
            let sequential = run_sequential(&matrix, &ProgressManager::new(), None);
            for depth in [1, 2, 3, 5, 8] {
                let parallel =
                    run_parallel(&matrix, depth, &ProgressManager::new(), &executor).unwrap();
                assert_eq!(parallel, sequential, "depth {} on {:?}", depth, rel);
            }
        }
    }

    #[test]
    fn service_parallel_matches_sequential() {
        let rel = skincare_relation();
        let sequential = PartitionService::default().partition(&rel).unwrap();
        let config = SearchConfig {
            parallel: true,
            split_depth: SplitDepth::new(3).unwrap(),
            ..SearchConfig::default()
        };
        let parallel = PartitionService::new(config)
            .with_executor(ParallelExecutor::new(ParallelConfig::new(2)))
            .partition(&rel)
            .unwrap();
        assert_eq!(parallel.partition, sequential.partition);
        assert!(parallel.summary.parallel);
        assert_eq!(parallel.summary.leaves_visited, 203);
        assert_eq!(parallel.summary.total_leaves, BigUint::from(203u32));
    }
}

/// サービスと周辺部品の連携
mod end_to_end {
    use super::*;

    #[test]
    fn budgeted_search_still_returns_valid_partition() {
        let mut rng = StdRng::seed_from_u64(99);
        let rel = random_relation(&mut rng, 7, 0.5);
        let config = SearchConfig {
            leaf_budget: Some(LeafBudget::new(100).unwrap()),
            ..SearchConfig::default()
        };
        let outcome = PartitionService::new(config).partition(&rel).unwrap();
        assert!(!outcome.is_complete());
        assert_eq!(outcome.summary.leaves_visited, 100);
        assert!(outcome.partition.is_valid(&rel));
        assert!(outcome.partition.covers(&linearize(&rel)));
    }

    #[test]
    fn guard_reports_instead_of_truncating() {
        let rel: ConflictRelation<u32> = (0..20).map(|i| (i, vec![])).collect();
        let err = PartitionService::default().partition(&rel).unwrap_err();
        let chain = format!("{:#}", err);
        assert!(chain.contains("20"), "{}", chain);

        let config = SearchConfig {
            max_items: ItemLimit::new(20).unwrap(),
            leaf_budget: Some(LeafBudget::new(1).unwrap()),
            ..SearchConfig::default()
        };
        let outcome = PartitionService::new(config).partition(&rel).unwrap();
        // 最初の葉は全項目一グループで、衝突が無いので妥当
        assert_eq!(outcome.group_count(), 1);
    }

    #[test]
    fn render_and_persist() {
        let rel = skincare_relation();
        let outcome = PartitionService::default().partition(&rel).unwrap();

        let dot = DotRenderer::default()
            .render(&rel, &outcome.partition)
            .unwrap();
        assert_eq!(dot.lines().filter(|l| l.contains("fillcolor")).count(), 6);
        assert_eq!(dot.lines().filter(|l| l.contains(" -- ")).count(), 13);

        let mut writer = MemoryReportWriter::new();
        writer
            .write_report(&SearchReport::from_outcome(&outcome))
            .unwrap();
        assert_eq!(writer.reports()[0].group_count, 4);

        let text = format_partition(&outcome.partition);
        assert!(text.ends_with("groups: 4\n"));
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn integer_items_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relation.json");
        std::fs::write(&path, r#"{"1": [2, 3], "2": [3, 4]}"#).unwrap();

        let rel = ConflictRelation::from_scalar_json_file(&path).unwrap();
        let outcome = PartitionService::default().partition(&rel).unwrap();
        assert_eq!(outcome.partition.to_string(), "[[1, 4], [2], [3]]");
        assert_eq!(format_partition(&outcome.partition).lines().count(), 4);
    }

    #[test]
    fn too_few_colors_fails_cleanly() {
        let rel = ConflictRelation::new()
            .with("A", vec!["B", "C"])
            .with("B", vec!["C"]);
        let p = minimum_partition(&rel);
        let renderer = DotRenderer::with_palette(vec!["red".into(), "blue".into()]).unwrap();
        assert!(renderer.render(&rel, &p).is_err());
        let singles = Partition::singletons(vec!["A", "B"]);
        assert!(renderer.render(&rel, &singles).is_ok());
    }
}
