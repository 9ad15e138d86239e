// ==========================================
// 导入流程集成测试
// ==========================================
// 测试目标: 上传字节 → 标准化 → 校验 → 生成 ID → 落库
// ==========================================


use inventory_desk::domain::Record;
use inventory_desk::importer::{ColumnNormalizer, ImportError, ImportMode, InventoryImporter};
use inventory_desk::logging;
use inventory_desk::repository::RepositoryError;
use test_helpers::{build_xlsx, create_test_repo, sample_records, sorted_by_product};

#[test]
fn test_blank_id_import_offsets_by_store_size() {
    logging::init_test();
    let (_temp, repo) = create_test_repo();
    repo.replace_all(&sample_records()[..2]).unwrap();

    let bytes = build_xlsx(
        &["Producto", "Categoría", "Cantidad", "Precio"],
        &[vec!["Martillo", "Herramientas", "3", "2.5"]],
    );
    let importer = InventoryImporter::new(repo.clone());
    let report = importer
        .import_bytes(&bytes, "stock.xlsx", ImportMode::Replace)
        .unwrap();

    assert_eq!(report.records_processed, 1);
    assert_eq!(report.ids_synthesized, 1);
    assert_eq!(
        repo.load_all().unwrap(),
        vec![Record::new("PROD-0003", "Martillo", "Herramientas", 3, 2.5, "")]
    );
}

#[test]
fn test_negative_quantity_import_rejected() {
    let (_temp, repo) = create_test_repo();
    let original = sample_records();
    repo.replace_all(&original).unwrap();

    let bytes = build_xlsx(
        &["Producto", "Categoría", "Cantidad", "Precio"],
        &[vec!["Martillo", "Herramientas", "-3", "2.5"]],
    );
    let err = InventoryImporter::new(repo.clone())
        .import_bytes(&bytes, "stock.xlsx", ImportMode::Replace)
        .unwrap_err();

    assert!(matches!(
        err,
        ImportError::Repository(RepositoryError::ConstraintViolation(_))
    ));
    assert_eq!(repo.load_all().unwrap(), sorted_by_product(&original));
}

#[test]
fn test_synonym_headers_and_coercion() {
    let (_temp, repo) = create_test_repo();

    let bytes = build_xlsx(
        &["id", "producto", "CATEGORIA", "cant", "precio unitario", "locacion", "Proveedor"],
        &[
            vec!["A-1", "Sierra", "Herramientas", "x", "10", "ALM-01", "ACME"],
            vec!["A-2", "Arroz", "Alimentos", "40.9", "abc", "", "ACME"],
        ],
    );
    InventoryImporter::new(repo.clone())
        .import_bytes(&bytes, "lote.xlsx", ImportMode::Replace)
        .unwrap();

    assert_eq!(
        repo.load_all().unwrap(),
        vec![
            Record::new("A-2", "Arroz", "Alimentos", 40, 0.0, ""),
            Record::new("A-1", "Sierra", "Herramientas", 0, 10.0, "ALM-01"),
        ]
    );
}

#[test]
fn test_missing_category_rejects_batch() {
    let (_temp, repo) = create_test_repo();
    repo.replace_all(&sample_records()).unwrap();

    let bytes = build_xlsx(
        &["Producto", "Categoría"],
        &[vec!["Sierra", "Herramientas"], vec!["Arroz", ""]],
    );
    let err = InventoryImporter::new(repo.clone())
        .import_bytes(&bytes, "lote.xlsx", ImportMode::Replace)
        .unwrap_err();

    assert!(matches!(err, ImportError::MissingField { row: 2, ref field } if field == "Categoría"));
    assert_eq!(repo.count().unwrap(), 4);
}

#[test]
fn test_header_only_workbook_is_empty_input() {
    let (_temp, repo) = create_test_repo();

    let bytes = build_xlsx(&["Producto", "Categoría"], &[]);
    let err = InventoryImporter::new(repo)
        .import_bytes(&bytes, "vacio.xlsx", ImportMode::Replace)
        .unwrap_err();

    assert!(matches!(err, ImportError::EmptyInput(_)));
}

#[test]
fn test_unreadable_bytes_are_parse_errors() {
    let (_temp, repo) = create_test_repo();
    let err = InventoryImporter::new(repo)
        .import_bytes(b"PK\x03\x04 truncated", "roto.xlsx", ImportMode::Replace)
        .unwrap_err();

    assert!(matches!(err, ImportError::Parse { ref file, .. } if file == "roto.xlsx"));
}

#[test]
fn test_csv_merge_import_keeps_existing() {
    let (_temp, repo) = create_test_repo();
    repo.replace_all(&sample_records()).unwrap();

    let csv = "Producto,Categoría,Cantidad,Precio\nTaladro,Herramientas,2,59.9\n";
    let report = InventoryImporter::new(repo.clone())
        .import_bytes(csv.as_bytes(), "nuevos.csv", ImportMode::Merge)
        .unwrap();

    assert_eq!(report.mode, ImportMode::Merge);
    assert_eq!(repo.count().unwrap(), 5);
    assert!(repo.exists("PROD-0005").unwrap());
}

#[test]
fn test_custom_synonyms() {
    let (_temp, repo) = create_test_repo();
    let normalizer =
        ColumnNormalizer::new().with_synonyms([("Articulo".to_string(), "Producto".to_string())]);

    let csv = "Articulo,Categoría\nClavos,Herramientas\n";
    InventoryImporter::with_normalizer(repo.clone(), normalizer)
        .import_bytes(csv.as_bytes(), "a.csv", ImportMode::Replace)
        .unwrap();

    assert_eq!(repo.load_all().unwrap()[0].product, "Clavos");
}

#[test]
fn test_merge_import_skips_ids_already_stored() {
    let (_temp, repo) = create_test_repo();
    // 2 条记录，编号有空洞
    repo.replace_all(&[
        Record::new("PROD-0001", "Alicate", "Herramientas", 4, 12.5, ""),
        Record::new("PROD-0003", "Cable", "Electrónica", 10, 3.0, "ALM-02"),
    ])
    .unwrap();

    let csv = "Producto,Categoría,Cantidad\nNuevo,Otros,1\n";
    let report = InventoryImporter::new(repo.clone())
        .import_bytes(csv.as_bytes(), "nuevos.csv", ImportMode::Merge)
        .unwrap();

    assert_eq!(report.ids_synthesized, 1);
    assert_eq!(report.preview[0].id, "PROD-0004");
    assert_eq!(
        repo.load_all().unwrap(),
        vec![
            Record::new("PROD-0001", "Alicate", "Herramientas", 4, 12.5, ""),
            Record::new("PROD-0003", "Cable", "Electrónica", 10, 3.0, "ALM-02"),
            Record::new("PROD-0004", "Nuevo", "Otros", 1, 0.0, ""),
        ]
    );
}

#[test]
fn test_duplicate_canonical_headers_keep_other_renames() {
    let (_temp, repo) = create_test_repo();

    let csv = "producto,categoria,cant,cantidad\nMartillo,Herramientas,3,9\n";
    InventoryImporter::new(repo.clone())
        .import_bytes(csv.as_bytes(), "lote.csv", ImportMode::Replace)
        .unwrap();

    assert_eq!(
        repo.load_all().unwrap(),
        vec![Record::new("PROD-0001", "Martillo", "Herramientas", 3, 0.0, "")]
    );
}
