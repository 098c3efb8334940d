use crate::{module::Module, reader::read_module};

pub(crate) const LIBRARY_FILE: &str = "new_library.rptlibrary";

pub(crate) const LIBRARY_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<library xmlns="urn:rptmodel:design" version="3.2.23">
    <property name="title">Shared sales data</property>
    <data-sources>
        <oda-data-source name="Data Source" id="2">
            <property name="extensionID">org.rptmodel.jdbc</property>
            <property name="odaURL">jdbc:classicmodels:sample</property>
        </oda-data-source>
    </data-sources>
    <data-sets>
        <oda-data-set name="Rev" id="3">
            <property name="dataSource">Data Source</property>
            <xml-property name="queryText"><![CDATA[select PRODUCTCODE, sum(PRICEEACH) as REV from ORDERDETAILS group by PRODUCTCODE]]></xml-property>
        </oda-data-set>
        <oda-data-set name="HistUnitsSales" id="4">
            <property name="dataSource">Data Source</property>
            <xml-property name="queryText"><![CDATA[select PRODUCTCODE, sum(QUANTITYORDERED) as UNITS from ORDERDETAILS group by PRODUCTCODE]]></xml-property>
            <method name="beforeOpen"><![CDATA[this.queryText = this.queryText + " order by 1";]]></method>
        </oda-data-set>
        <joint-data-set name="Data Set" id="5">
            <simple-property-list name="dataSets">
                <value>Rev</value>
                <value>HistUnitsSales</value>
            </simple-property-list>
            <list-property name="joinConditions">
                <structure>
                    <property name="joinType">inner</property>
                    <property name="joinOperator">eq</property>
                    <property name="leftDataSet">Rev</property>
                    <property name="rightDataSet">HistUnitsSales</property>
                    <expression name="leftExpression">dataSetRow["PRODUCTCODE"]</expression>
                    <expression name="rightExpression">dataSetRow["PRODUCTCODE"]</expression>
                </structure>
            </list-property>
        </joint-data-set>
    </data-sets>
</library>
"#;

pub(crate) const REPORT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<report xmlns="urn:rptmodel:design" version="3.2.23">
    <property name="author">sales team</property>
    <list-property name="libraries">
        <structure>
            <property name="fileName">new_library.rptlibrary</property>
            <property name="namespace">new_library</property>
        </structure>
    </list-property>
    <data-sets>
        <joint-data-set name="Data Set" id="7" extends="new_library.Data Set"/>
        <joint-data-set name="Local Join" id="8">
            <simple-property-list name="dataSets">
                <value>new_library.Rev</value>
                <value>new_library.HistUnitsSales</value>
            </simple-property-list>
            <list-property name="joinConditions">
                <structure>
                    <property name="joinType">left-out</property>
                    <property name="leftDataSet">new_library.Rev</property>
                    <property name="rightDataSet">new_library.HistUnitsSales</property>
                    <expression name="leftExpression">dataSetRow["PRODUCTCODE"]</expression>
                    <expression name="rightExpression">dataSetRow["PRODUCTCODE"]</expression>
                </structure>
            </list-property>
        </joint-data-set>
    </data-sets>
</report>
"#;

pub(crate) fn library() -> Module {
    read_module(LIBRARY_XML, LIBRARY_FILE).expect("library fixture should read")
}

/// Report with `new_library` loaded under its declared namespace.
pub(crate) fn report_with_library() -> Module {
    let mut report = read_module(REPORT_XML, "report.rptdesign").expect("report fixture should read");
    report
        .attach_library("new_library", library())
        .expect("library is declared");

    report
}
